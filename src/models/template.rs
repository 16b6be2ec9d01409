use crate::models::prompt::Message;

const GRAMMAR_SYSTEM: &str = "You are AskDurga AI — a friendly English assistant. When the user gives a sentence, fix the grammar and return two things only:\n1. The corrected sentence in clean, proper English.\n2. A short one-line reason for the mistake in very simple English (like 'you used wrong word order' or 'you missed the verb'). Do not mention capitalization, commas, or punctuation unless it changes meaning.";

const CODE_SYSTEM: &str = r#"You are AskDurga AI — a code explainer assistant.

When the user provides any code in any programming language (like JavaScript, Python, Java, etc.), follow these rules:

1. Rewrite the same code clearly and neatly.
2. Add step-by-step comments before each major action in this exact format:
   // step-1: ...
   // step-2: ...
   (Use numbering properly in order.)
3. If the code includes any built-in function or method (like console.log(), print(), len(), etc.), add a short inline comment explaining what it does.
4. Do not explain outside the code — only show commented code.
5. Keep the tone clean and simple, just like this example:

Example Output:
```javascript
// step-1: Define the function named 'greet' with 0 parameters
function greet() {
  // step-2: Inside the function, print a message to the console
  console.log('Hello AskDurga-AI'); // it will print "Hello AskDurga-AI"
}

// step-3: Call the 'greet' function (no arguments passed)
greet();
```
"#;

/// The two supported prompt modes, resolved once per request from the
/// validated language string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptTemplate {
    Grammar,
    CodeExplain { language: String },
}

impl PromptTemplate {
    /// Case-insensitive exact match, no trimming: only "english" (in any
    /// casing) selects the grammar template.
    pub fn resolve(language: &str) -> Self {
        if language.to_lowercase() == "english" {
            PromptTemplate::Grammar
        } else {
            PromptTemplate::CodeExplain {
                language: language.to_owned(),
            }
        }
    }

    pub fn messages(&self, input: &str) -> Vec<Message> {
        match self {
            PromptTemplate::Grammar => vec![
                Message::system(GRAMMAR_SYSTEM),
                Message::user(format!(
                    "Correct this sentence and explain shortly:\n\n\"{input}\""
                )),
            ],
            PromptTemplate::CodeExplain { language } => vec![
                Message::system(CODE_SYSTEM),
                Message::user(format!(
                    r#"Explain this {language} code by rewriting it with step-by-step comments as shown in the example.

1. Only return the code — do not add any extra explanation.
2. Follow the numbering pattern (step-1, step-2, etc.).
3. Explain any built-in functions or methods inline.
4. Keep code structure clean and easy to read.

Code:
{input}"#
                )),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_selects_grammar_template() {
        assert_eq!(PromptTemplate::resolve("english"), PromptTemplate::Grammar);
        assert_eq!(PromptTemplate::resolve("ENGLISH"), PromptTemplate::Grammar);
        assert_eq!(PromptTemplate::resolve("English"), PromptTemplate::Grammar);
    }

    #[test]
    fn everything_else_selects_code_template() {
        for language in ["englis", "", "python", "ENGLISH "] {
            assert_eq!(
                PromptTemplate::resolve(language),
                PromptTemplate::CodeExplain {
                    language: language.to_string()
                }
            );
        }
    }

    #[test]
    fn grammar_messages_quote_the_sentence() {
        let messages = PromptTemplate::Grammar.messages("He go to school");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("friendly English assistant"));
        assert_eq!(messages[1].role, "user");
        assert_eq!(
            messages[1].content,
            "Correct this sentence and explain shortly:\n\n\"He go to school\""
        );
    }

    #[test]
    fn code_messages_embed_code_and_language() {
        let template = PromptTemplate::resolve("python");
        let messages = template.messages("print('hi')");

        assert_eq!(messages.len(), 2);
        assert!(messages[0].content.contains("code explainer assistant"));
        assert!(messages[0].content.contains("step-1"));
        assert!(messages[1].content.starts_with("Explain this python code"));
        assert!(messages[1].content.ends_with("Code:\nprint('hi')"));
    }
}
