//! Synthesis voice descriptors and the per-utterance selection policy.

/// One voice offered by the synthesis platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    pub lang: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }

    fn is_en_us(&self) -> bool {
        self.lang == "en-US"
    }
}

/// Pick a voice for one utterance. Preference order: a voice whose name
/// contains `preferred`, then a female en-US voice, then any en-US
/// voice, then the platform default (`None`).
///
/// Selection runs per utterance because platforms populate the voice
/// list asynchronously.
pub fn select_voice<'a>(voices: &'a [Voice], preferred: &str) -> Option<&'a Voice> {
    voices
        .iter()
        .find(|v| v.name.contains(preferred))
        .or_else(|| {
            voices
                .iter()
                .find(|v| v.is_en_us() && v.name.contains("Female"))
        })
        .or_else(|| voices.iter().find(|v| v.is_en_us()))
        .or_else(|| voices.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Voice> {
        vec![
            Voice::new("Thomas", "fr-FR"),
            Voice::new("Microsoft Zira Female", "en-US"),
            Voice::new("Alex", "en-US"),
            Voice::new("Google US English", "en-US"),
        ]
    }

    #[test]
    fn test_prefers_named_voice() {
        let voices = catalog();
        let voice = select_voice(&voices, "Google US English").unwrap();
        assert_eq!(voice.name, "Google US English");
    }

    #[test]
    fn test_falls_back_to_female_en_us() {
        let voices = catalog();
        let voice = select_voice(&voices, "Samantha").unwrap();
        assert_eq!(voice.name, "Microsoft Zira Female");
    }

    #[test]
    fn test_falls_back_to_any_en_us() {
        let voices = vec![Voice::new("Thomas", "fr-FR"), Voice::new("Alex", "en-US")];
        let voice = select_voice(&voices, "Samantha").unwrap();
        assert_eq!(voice.name, "Alex");
    }

    #[test]
    fn test_falls_back_to_first_voice() {
        let voices = vec![Voice::new("Thomas", "fr-FR")];
        let voice = select_voice(&voices, "Samantha").unwrap();
        assert_eq!(voice.name, "Thomas");
    }

    #[test]
    fn test_empty_catalog_selects_nothing() {
        assert!(select_voice(&[], "Samantha").is_none());
    }
}
