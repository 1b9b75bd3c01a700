use crate::model::EmailContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentTab {
    #[default]
    Original,
    Translated,
}

impl ContentTab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Original => "Original",
            Self::Translated => "Translated",
        }
    }
}

/// Subject and body as they should be shown for a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentView<'a> {
    pub subject: &'a str,
    pub body: &'a str,
    pub showing_translation: bool,
    pub has_translation: bool,
}

/// Resolves what a content tab shows. Without a translation the original is
/// shown whatever the tab says; an empty translated field falls back to the
/// original one.
pub fn resolve<'a>(
    original: &'a EmailContent,
    translated: Option<&'a EmailContent>,
    tab: ContentTab,
) -> ContentView<'a> {
    match (tab, translated) {
        (ContentTab::Translated, Some(t)) => ContentView {
            subject: non_empty_or(&t.subject, &original.subject),
            body: non_empty_or(&t.body, &original.body),
            showing_translation: true,
            has_translation: true,
        },
        _ => ContentView {
            subject: &original.subject,
            body: &original.body,
            showing_translation: false,
            has_translation: translated.is_some(),
        },
    }
}

fn non_empty_or<'a>(preferred: &'a str, fallback: &'a str) -> &'a str {
    if preferred.is_empty() {
        fallback
    } else {
        preferred
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(subject: &str, body: &str) -> EmailContent {
        EmailContent {
            subject: subject.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn untranslated_record_never_shows_translation() {
        let original = content("Adresse", "Bitte");
        let view = resolve(&original, None, ContentTab::Translated);
        assert_eq!(view.subject, "Adresse");
        assert!(!view.showing_translation);
        assert!(!view.has_translation);
    }

    #[test]
    fn translated_tab_falls_back_per_field() {
        let original = content("Adresse", "Bitte");
        let translated = content("", "Please");
        let view = resolve(&original, Some(&translated), ContentTab::Translated);
        assert_eq!(view.subject, "Adresse");
        assert_eq!(view.body, "Please");
        assert!(view.showing_translation);
    }

    #[test]
    fn original_tab_with_translation_available() {
        let original = content("Adresse", "Bitte");
        let translated = content("Address", "Please");
        let view = resolve(&original, Some(&translated), ContentTab::Original);
        assert_eq!(view.body, "Bitte");
        assert!(view.has_translation);
        assert!(!view.showing_translation);
    }
}
