use serde::Serialize;

const FRONT_LABEL: &str = "Front:";
const BACK_LABEL: &str = "Back:";

/// A study card: a term or question on the front, its explanation on the back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// Parse `Front:` / `Back:` pairs out of a model response.
///
/// A card needs both sides on their own labelled lines; a `Back:` without a
/// preceding `Front:` and a `Front:` without a `Back:` are dropped. Lines that
/// follow a label without one of their own continue that side of the card.
pub fn parse_flashcards(response: &str) -> Vec<Flashcard> {
    let mut cards = Vec::new();
    let mut front: Option<String> = None;
    let mut back: Option<String> = None;

    for line in response.lines().map(str::trim) {
        if let Some(text) = strip_label(line, FRONT_LABEL) {
            push_card(&mut cards, front.take(), back.take());
            front = Some(text.to_string());
        } else if let Some(text) = strip_label(line, BACK_LABEL) {
            if front.is_some() && back.is_none() {
                back = Some(text.to_string());
            } else {
                tracing::debug!("Dropping stray flashcard back: {}", text);
            }
        } else if line.is_empty() {
            push_card(&mut cards, front.take(), back.take());
        } else if let Some(side) = back.as_mut().or(front.as_mut()) {
            side.push(' ');
            side.push_str(line);
        }
    }

    push_card(&mut cards, front, back);
    cards
}

fn push_card(cards: &mut Vec<Flashcard>, front: Option<String>, back: Option<String>) {
    let (Some(front), Some(back)) = (front, back) else {
        return;
    };

    let (front, back) = (front.trim().to_string(), back.trim().to_string());
    if front.is_empty() || back.is_empty() {
        return;
    }

    cards.push(Flashcard { front, back });
}

/// Accepts `Front: x`, `**Front:** x` and `- Front: x`
fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let line = line.trim_start_matches(['-', '*', ' ']);
    let rest = line.strip_prefix(label)?;
    Some(rest.trim_start_matches('*').trim())
}

/// Plain-text export, one card per line
pub fn format_flashcards(cards: &[Flashcard]) -> String {
    cards
        .iter()
        .map(|card| format!("{} - {}", card.front, card.back))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_labelled_pairs() {
        let text = "Front: Photosynthesis\nBack: How plants turn light into energy\n\nFront: Mitochondria\nBack: The powerhouse of the cell";
        let cards = parse_flashcards(text);

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].front, "Photosynthesis");
        assert_eq!(cards[1].back, "The powerhouse of the cell");
    }

    #[test]
    fn test_tolerates_markdown_and_continuations() {
        let text = "Here are your cards:\n\n**Front:** Ohm's law\n**Back:** V = I * R,\nrelating voltage and current\n- Front: Watt\n- Back: Unit of power";
        let cards = parse_flashcards(text);

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].front, "Ohm's law");
        assert_eq!(cards[0].back, "V = I * R, relating voltage and current");
        assert_eq!(cards[1], Flashcard { front: "Watt".into(), back: "Unit of power".into() });
    }

    #[test]
    fn test_drops_incomplete_cards() {
        let text = "Front: lonely\n\nBack: orphan\n\nFront: empty back\nBack:   \n\nFront: good\nBack: card";
        let cards = parse_flashcards(text);

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "good");
    }

    #[test]
    fn test_format_flashcards() {
        let cards = vec![
            Flashcard { front: "A".into(), back: "first".into() },
            Flashcard { front: "B".into(), back: "second".into() },
        ];
        assert_eq!(format_flashcards(&cards), "A - first\nB - second");
    }
}
