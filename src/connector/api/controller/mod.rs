pub mod chat_controller;
pub mod dataset_controller;
pub mod providers_controller;

pub use chat_controller::ChatController;
pub use dataset_controller::DatasetController;
pub use providers_controller::ProvidersController;
