use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP chat endpoint (POST /api/chat)
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },

    /// Send a single prompt and print the HTML reply
    Ask {
        prompt: String,

        /// primary (OpenAI) or secondary (Mistral)
        #[arg(short, long, default_value = "primary")]
        provider: String,

        /// Enable task guidance for the named task
        #[arg(short, long)]
        task: Option<String>,

        /// JSON file holding earlier turns ([{"type": "user"|"ai", "content": ..., "timestamp": ...}])
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Print the grounding dataset attached to conversations
    Dataset,

    /// List the configured providers and their models
    Providers,
}
