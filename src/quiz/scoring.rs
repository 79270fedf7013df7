use serde::Serialize;

use super::QuizQuestion;

/// Outcome of one answered (or skipped) question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub selected_option: Option<String>,
    pub correct_option: String,
}

impl QuizResult {
    pub fn is_correct(&self) -> bool {
        self.selected_option.as_deref() == Some(self.correct_option.as_str())
    }
}

/// Graded quiz
#[derive(Debug, Clone, Serialize)]
pub struct QuizReport {
    pub results: Vec<QuizResult>,
    pub score: usize,
    pub total: usize,
}

impl std::fmt::Display for QuizReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "You scored {} out of {}!", self.score, self.total)
    }
}

/// Pair every question with the selection made for it.
///
/// Selections beyond the last question are ignored; questions without a
/// selection count as unanswered.
pub fn grade<S: AsRef<str>>(questions: &[QuizQuestion], selections: &[Option<S>]) -> QuizReport {
    let results: Vec<QuizResult> = questions
        .iter()
        .enumerate()
        .map(|(index, question)| QuizResult {
            selected_option: selections
                .get(index)
                .and_then(|selection| selection.as_ref())
                .map(|selection| AsRef::<str>::as_ref(selection).to_string()),
            correct_option: question.correct_option().to_string(),
        })
        .collect();

    let score = results.iter().filter(|result| result.is_correct()).count();

    QuizReport {
        score,
        total: questions.len(),
        results,
    }
}

/// Number of selections matching the correct option text
pub fn score<S: AsRef<str>>(questions: &[QuizQuestion], selections: &[Option<S>]) -> usize {
    grade(questions, selections).score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<QuizQuestion> {
        vec![
            QuizQuestion::new("What is 2+2?", ["3", "4", "5", "6"], 1).unwrap(),
            QuizQuestion::new("Largest planet?", ["Mars", "Venus", "Jupiter", "Earth"], 2).unwrap(),
            QuizQuestion::new("Colour of the sky?", ["Green", "Blue", "Red", "Black"], 1).unwrap(),
        ]
    }

    #[test]
    fn test_counts_matching_selections() {
        let selections = [Some("4"), Some("Mars"), Some("Blue")];
        let report = grade(&questions(), &selections);

        assert_eq!(report.score, 2);
        assert_eq!(report.total, 3);
        assert!(report.results[0].is_correct());
        assert!(!report.results[1].is_correct());
        assert_eq!(report.results[1].correct_option, "Jupiter");
        assert_eq!(report.to_string(), "You scored 2 out of 3!");
    }

    #[test]
    fn test_unanswered_never_counts() {
        let selections: [Option<&str>; 3] = [None, None, None];
        assert_eq!(score(&questions(), &selections), 0);

        let selections = [Some("4")];
        let report = grade(&questions(), &selections);
        assert_eq!(report.score, 1);
        assert_eq!(report.results[2].selected_option, None);
    }

    #[test]
    fn test_score_stays_within_bounds() {
        let selections = [Some("4"), Some("Jupiter"), Some("Blue"), Some("extra"), Some("4")];
        assert_eq!(score(&questions(), &selections), 3);

        let no_questions: Vec<QuizQuestion> = Vec::new();
        assert_eq!(score(&no_questions, &selections), 0);
    }

    #[test]
    fn test_matching_is_exact() {
        let selections = [Some("4 "), Some("jupiter"), Some("Blue")];
        assert_eq!(score(&questions(), &selections), 1);
    }
}
