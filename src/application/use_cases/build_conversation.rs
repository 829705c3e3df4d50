use tracing::debug;

use crate::domain::{DomainError, GroundingDataset, Message, TaskGuidanceContext, Turn, TurnKind};

/// Number of most recent history turns forwarded to the model.
pub const HISTORY_WINDOW: usize = 10;

/// Case-insensitive substrings that make the grounding dataset relevant.
pub const GROUNDING_KEYWORDS: &[&str] = &[
    "analytics",
    "data",
    "conversion",
    "visitors",
    "traffic",
    "performance",
    "report",
];

const GROUNDING_LABEL: &str = "Here is the available GA4 JSON data for analysis:";

/// Output-formatting rules every reply must follow. The front-end renders the
/// reply as HTML, so markdown emphasis is forbidden.
const BASE_SYSTEM_PROMPT: &str = "\
You are an experienced digital marketing analyst. You are friendly and helpful.

CRITICAL FORMATTING RULES - MANDATORY FOR ALL ANSWERS:

FORBIDDEN: NEVER use markdown syntax such as **text** or *text*
MANDATORY: Use ONLY HTML tags such as <strong>text</strong>

For ordinary conversation: answer in plain text.

For ANALYSES and EXPLANATIONS follow this structure:
<h3>📊 Main topic</h3>
<p>Introductory explanation with <strong>important figures</strong> and <strong>key metrics</strong>.</p>
<br>

<h3>📈 Next topic</h3>
<ul>
<li><strong>Point 1:</strong> Explanation with specific details</li>
<li><strong>Point 2:</strong> Explanation with specific details</li>
</ul>
<br>

For TASK GUIDANCE use this step-by-step structure:
<strong>Step 1: Title of the step</strong>
<p>Detailed explanation of exactly what the user has to do.</p>
<br>

<strong>Step 2: Next step title</strong>
<p>Next detailed instruction.</p>
<br>

MANDATORY RULES:
- Use ONLY <strong> for figures, percentages and important terms (NOT **figures**)
- Always put <br> AFTER every section (after </p>, </ul>, </ol>) for white space
- Keep paragraphs short and easy to scan
- In analyses: use emoji in headers (📊📈📉💡🎯)
- In steps: put the numbering inside <strong> tags
- FORBIDDEN: **text**, *text*, ###text - use ONLY HTML tags";

/// Appended to the base prompt while task guidance is active.
/// `{task}` is replaced with the active task description.
const TASK_GUIDANCE_TEMPLATE: &str = "

🎯 TASK GUIDANCE ACTIVE:
- Specific task: \"{task}\"
- Platform: WordPress website with the Divi site builder
- MANDATORY: ALWAYS use the step-by-step formatting below
- NEVER answer task guidance in plain text

MANDATORY TASK GUIDANCE FORMATTING - EXACTLY THIS PATTERN:
<h3>🎯 Task guidance: {task}</h3>
<p>Welcome! I will guide you step by step through this task on your WordPress site with Divi.</p>
<br>

<strong>Step 1: [Descriptive title]</strong>
<p>[Detailed explanation of what to do]</p>
<br>

<strong>Step 2: [Next step title]</strong>
<p>[Concrete instructions for WordPress/Divi]</p>
<br>

CRITICAL:
- ALWAYS start with an <h3> header
- Every step MUST have <strong>, <p> and <br>
- NEVER use plain text without HTML tags
- A plain-text answer will be rejected";

/// Assembles the ordered message list submitted to a provider:
/// system prompt, optional grounding data, the recent history window and the
/// new prompt, in that order.
///
/// Stateless: history is borrowed for the duration of one call and never kept.
#[derive(Debug, Clone)]
pub struct ConversationBuilder {
    history_window: usize,
    dataset: &'static GroundingDataset,
}

impl ConversationBuilder {
    pub fn new() -> Self {
        Self {
            history_window: HISTORY_WINDOW,
            dataset: GroundingDataset::sample(),
        }
    }

    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    pub fn build(
        &self,
        prompt: &str,
        history: &[Turn],
        task_guidance: &TaskGuidanceContext,
    ) -> Result<Vec<Message>, DomainError> {
        let recent = &history[history.len().saturating_sub(self.history_window)..];
        let mut messages = Vec::with_capacity(recent.len() + 3);

        messages.push(Message::system(Self::system_prompt(task_guidance)));

        if Self::needs_grounding(prompt, history) {
            messages.push(Message::user(self.grounding_message()?));
        }

        for turn in recent {
            match turn.kind() {
                TurnKind::User => messages.push(Message::user(turn.content())),
                TurnKind::Ai => messages.push(Message::assistant(turn.content())),
                TurnKind::Other => {}
            }
        }

        messages.push(Message::user(prompt));

        debug!(
            "Built conversation: {} messages ({} of {} history turns kept, window starts at {:?})",
            messages.len(),
            recent.len(),
            history.len(),
            recent.first().map(Turn::timestamp)
        );

        Ok(messages)
    }

    pub fn system_prompt(task_guidance: &TaskGuidanceContext) -> String {
        if task_guidance.is_active() {
            let addendum =
                TASK_GUIDANCE_TEMPLATE.replace("{task}", task_guidance.task_description());
            format!("{BASE_SYSTEM_PROMPT}{addendum}")
        } else {
            BASE_SYSTEM_PROMPT.to_string()
        }
    }

    /// The first turn always gets the dataset; afterwards only when the prompt
    /// or any earlier turn mentions one of [`GROUNDING_KEYWORDS`].
    pub fn needs_grounding(prompt: &str, history: &[Turn]) -> bool {
        history.is_empty()
            || mentions_keyword(prompt)
            || history.iter().any(|turn| mentions_keyword(turn.content()))
    }

    fn grounding_message(&self) -> Result<String, DomainError> {
        let json = serde_json::to_string_pretty(self.dataset).map_err(|e| {
            DomainError::internal(format!("Failed to serialize grounding dataset: {e}"))
        })?;
        Ok(format!("{GROUNDING_LABEL}\n{json}"))
    }
}

impl Default for ConversationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn mentions_keyword(text: &str) -> bool {
    let lowered = text.to_lowercase();
    GROUNDING_KEYWORDS.iter().any(|k| lowered.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn alternating(n: usize) -> Vec<Turn> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    Turn::user(format!("question {i}"))
                } else {
                    Turn::ai(format!("answer {i}"))
                }
            })
            .collect()
    }

    fn grounding_count(messages: &[Message]) -> usize {
        messages
            .iter()
            .filter(|m| m.content().starts_with(GROUNDING_LABEL))
            .count()
    }

    #[test]
    fn test_first_turn_always_gets_grounding() {
        let builder = ConversationBuilder::new();
        let messages = builder
            .build("hello there", &[], &TaskGuidanceContext::inactive())
            .unwrap();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role(), Role::System);
        assert_eq!(messages[1].role(), Role::User);
        assert!(messages[1].content().starts_with(GROUNDING_LABEL));
        assert!(messages[1].content().contains("\"screenPageViews\""));
        assert_eq!(messages[2].content(), "hello there");
    }

    #[test]
    fn test_keyword_in_prompt_attaches_grounding_after_system() {
        let builder = ConversationBuilder::new();
        let history = alternating(4);
        let messages = builder
            .build(
                "How is my TRAFFIC doing?",
                &history,
                &TaskGuidanceContext::inactive(),
            )
            .unwrap();

        assert_eq!(grounding_count(&messages), 1);
        assert!(messages[1].content().starts_with(GROUNDING_LABEL));
        assert_eq!(messages[2].content(), "question 0");
    }

    #[test]
    fn test_keyword_in_history_attaches_grounding() {
        let builder = ConversationBuilder::new();
        let history = vec![Turn::user("show the conversion report"), Turn::ai("sure")];
        let messages = builder
            .build("and yesterday?", &history, &TaskGuidanceContext::inactive())
            .unwrap();

        assert_eq!(grounding_count(&messages), 1);
    }

    #[test]
    fn test_no_keyword_and_history_skips_grounding() {
        let builder = ConversationBuilder::new();
        let history = vec![Turn::user("hi"), Turn::ai("hello!")];
        let messages = builder
            .build("thanks", &history, &TaskGuidanceContext::inactive())
            .unwrap();

        assert_eq!(grounding_count(&messages), 0);
        assert_eq!(messages.len(), 4);
    }

    #[test]
    fn test_keyword_match_is_substring() {
        assert!(ConversationBuilder::needs_grounding(
            "any database tips?",
            &[Turn::user("x")]
        ));
        assert!(ConversationBuilder::needs_grounding(
            "Reporting lines",
            &[Turn::user("x")]
        ));
        assert!(!ConversationBuilder::needs_grounding(
            "how do I add a button",
            &[Turn::user("x")]
        ));
    }

    #[test]
    fn test_history_window_keeps_last_ten_in_order() {
        let builder = ConversationBuilder::new();
        let history = alternating(15);
        let messages = builder
            .build("next", &history, &TaskGuidanceContext::inactive())
            .unwrap();

        // system + 10 history + prompt, no keywords present
        assert_eq!(messages.len(), 12);
        let kept: Vec<&str> = messages[1..11].iter().map(|m| m.content()).collect();
        let expected: Vec<String> = history[5..].iter().map(|t| t.content().to_string()).collect();
        assert_eq!(kept, expected);
        assert_eq!(messages[1].role(), Role::Assistant);
        assert_eq!(messages[2].role(), Role::User);
    }

    #[test]
    fn test_dropped_turns_still_trigger_grounding() {
        let builder = ConversationBuilder::new();
        let mut history = vec![Turn::user("what about analytics?")];
        history.extend(alternating(12));
        let messages = builder
            .build("ok", &history, &TaskGuidanceContext::inactive())
            .unwrap();

        assert_eq!(grounding_count(&messages), 1);
        assert!(!messages
            .iter()
            .any(|m| m.content() == "what about analytics?"));
    }

    #[test]
    fn test_unknown_turn_kinds_are_skipped() {
        let builder = ConversationBuilder::new();
        let history = vec![
            Turn::user("hi"),
            Turn::new(TurnKind::Other, "ignored", ""),
            Turn::ai("hello"),
        ];
        let messages = builder
            .build("bye", &history, &TaskGuidanceContext::inactive())
            .unwrap();

        assert!(messages.iter().all(|m| m.content() != "ignored"));
        assert_eq!(messages.len(), 4);
    }

    #[test]
    fn test_length_bound_holds() {
        let builder = ConversationBuilder::new();
        for n in [1usize, 3, 9, 10, 11, 25] {
            let history = alternating(n);
            let messages = builder
                .build("data please", &history, &TaskGuidanceContext::inactive())
                .unwrap();
            assert!(messages.len() <= 1 + 1 + n.min(HISTORY_WINDOW) + 1);
            assert_eq!(
                messages.iter().filter(|m| m.role() == Role::System).count(),
                1
            );
            assert_eq!(messages.last().unwrap().content(), "data please");
        }
    }

    #[test]
    fn test_task_guidance_changes_system_prompt() {
        let plain = ConversationBuilder::system_prompt(&TaskGuidanceContext::inactive());
        let guided = ConversationBuilder::system_prompt(&TaskGuidanceContext::active(
            "Add a contact form",
        ));

        assert_ne!(plain, guided);
        assert!(guided.starts_with(&plain));
        assert!(guided.contains("\"Add a contact form\""));
        assert!(guided.contains("Task guidance: Add a contact form"));
        assert!(!plain.contains("Add a contact form"));
    }

    #[test]
    fn test_inactive_guidance_ignores_description() {
        let context = TaskGuidanceContext::new(false, "Add a contact form");
        let prompt = ConversationBuilder::system_prompt(&context);
        assert!(!prompt.contains("Add a contact form"));
    }

    #[test]
    fn test_custom_window() {
        let builder = ConversationBuilder::new().with_history_window(2);
        let history = alternating(6);
        let messages = builder
            .build("next", &history, &TaskGuidanceContext::inactive())
            .unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].content(), "question 4");
    }
}
