//! Instruction template wrapped around unmatched questions.

use campuschat_config::FallbackConfig;

/// Builds the task prompt sent to the remote model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    institution: String,
    short_name: String,
    language: String,
    excluded_languages: Vec<String>,
}

impl PromptTemplate {
    pub fn new(
        institution: impl Into<String>,
        short_name: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            institution: institution.into(),
            short_name: short_name.into(),
            language: language.into(),
            excluded_languages: Vec::new(),
        }
    }

    /// Languages named in the answer-language rule as not to be mixed in.
    pub fn with_excluded_languages(mut self, languages: Vec<String>) -> Self {
        self.excluded_languages = languages;
        self
    }

    pub fn from_config(config: &FallbackConfig) -> Self {
        Self::new(&config.institution, &config.short_name, &config.language)
            .with_excluded_languages(config.excluded_languages.clone())
    }

    /// Embed `message` in the fixed instructions.
    pub fn render(&self, message: &str) -> String {
        let exclusion = if self.excluded_languages.is_empty() {
            String::from(".")
        } else {
            format!(" (no {}).", self.excluded_languages.join(" or "))
        };

        format!(
            "You are a university information chatbot for {institution}.\n\
             \n\
             User question: {message}\n\
             \n\
             Rules:\n\
             - Answer ONLY in {language}{exclusion}\n\
             - If you know an official {short_name} link, include it.\n\
             - If you are not sure about a fact, do NOT guess.\n\
             - Prefer short, clear bullet points (3–6 lines).\n",
            institution = self.institution,
            language = self.language,
            short_name = self.short_name,
        )
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::from_config(&FallbackConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prompt_text() {
        let prompt = PromptTemplate::default().render("Is there a hostel at UTD?");
        let expected = concat!(
            "You are a university information chatbot for CSVTU (Chhattisgarh Swami Vivekanand Technical University).\n",
            "\n",
            "User question: Is there a hostel at UTD?\n",
            "\n",
            "Rules:\n",
            "- Answer ONLY in English (no Hindi or Hinglish).\n",
            "- If you know an official CSVTU link, include it.\n",
            "- If you are not sure about a fact, do NOT guess.\n",
            "- Prefer short, clear bullet points (3–6 lines).\n",
        );
        assert_eq!(prompt, expected);
    }

    #[test]
    fn language_is_configurable() {
        let prompt = PromptTemplate::new("Example Institute", "EI", "Hindi").render("hi");
        assert!(prompt.starts_with("You are a university information chatbot for Example Institute."));
        assert!(prompt.contains("- Answer ONLY in Hindi.\n"));
        assert!(prompt.contains("- If you know an official EI link, include it.\n"));
    }

    #[test]
    fn single_excluded_language() {
        let prompt = PromptTemplate::new("Example Institute", "EI", "Hindi")
            .with_excluded_languages(vec!["English".into()])
            .render("hi");
        assert!(prompt.contains("- Answer ONLY in Hindi (no English).\n"));
    }

    #[test]
    fn message_is_embedded_verbatim() {
        let message = "  {braces} and\nnewlines  ";
        let prompt = PromptTemplate::default().render(message);
        assert!(prompt.contains(message));
    }
}
