/// English tip vocabulary and its Portuguese replacement, applied in order.
/// No replacement contains any key, though a replacement can still join with
/// neighbouring text to form one.
pub const PREDICTION_TRANSLATIONS: &[(&str, &str)] = &[
    ("Under", "Abaixo de"),
    ("Over", "Acima de"),
    ("goals", "gols"),
    ("Home", "Time da casa"),
    ("Away", "Time visitante"),
    ("Win", "ganha"),
    ("and", "e"),
    ("Btts", "ambos os times marcam"),
    ("Yes", "Sim"),
    ("No", "Não"),
];

/// Translate a prediction label to Portuguese.
///
/// Plain substring replacement, so later keys also hit text produced by earlier
/// ones: "Homeland" becomes "Time da casale".
pub fn translate_prediction(prediction: &str) -> String {
    PREDICTION_TRANSLATIONS
        .iter()
        .fold(prediction.to_string(), |text, (from, to)| {
            text.replace(from, to)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_prediction() {
        assert_eq!(translate_prediction("Over 2.5 goals"), "Acima de 2.5 gols");
        assert_eq!(translate_prediction("Under 1.5 goals"), "Abaixo de 1.5 gols");
        assert_eq!(translate_prediction("Home Win"), "Time da casa ganha");
        assert_eq!(
            translate_prediction("Away Win and Over 1.5"),
            "Time visitante ganha e Acima de 1.5"
        );
        assert_eq!(translate_prediction("Btts Yes"), "ambos os times marcam Sim");
        assert_eq!(translate_prediction("Btts No"), "ambos os times marcam Não");
        assert_eq!(translate_prediction(""), "");
    }

    #[test]
    fn test_translate_is_substring_based() {
        // "Home" first, then "and" inside the leftover "land"
        assert_eq!(translate_prediction("Homeland"), "Time da casale");
        assert_eq!(translate_prediction("Standard"), "Steard");
    }

    #[test]
    fn test_translate_idempotent() {
        let inputs = [
            "Over 2.5 goals",
            "Under 3.5 goals",
            "Home Win",
            "Away Win and Btts Yes",
            "Btts No",
            "Draw",
            "1X",
        ];
        for input in inputs {
            let once = translate_prediction(input);
            assert_eq!(translate_prediction(&once), once, "input: {}", input);
        }
    }

    #[test]
    fn test_replacement_can_join_into_a_key() {
        let once = translate_prediction("Ovandr");
        assert_eq!(once, "Over");
        assert_eq!(translate_prediction(&once), "Acima de");
    }

    #[test]
    fn test_no_replacement_contains_a_key() {
        for (_, to) in PREDICTION_TRANSLATIONS {
            for (from, _) in PREDICTION_TRANSLATIONS {
                assert!(!to.contains(from), "'{}' contains key '{}'", to, from);
            }
        }
    }
}
