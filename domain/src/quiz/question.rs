//! Quiz questions and the built-in question bank.

use crate::core::house::House;
use crate::sorting::rng::RandomSource;
use serde::{Deserialize, Serialize};

/// One selectable answer: a button label and the house it counts toward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub label: String,
    pub house: House,
}

impl Answer {
    pub fn new(label: impl Into<String>, house: House) -> Self {
        Self {
            label: label.into(),
            house,
        }
    }
}

/// A prompt plus its ordered answers.
///
/// Questions are immutable once built; sessions hold their own copy of the
/// sequence assigned at start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn new(prompt: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            prompt: prompt.into(),
            answers,
        }
    }

    /// The answer at `index`, if it exists on this question.
    pub fn answer(&self, index: usize) -> Option<&Answer> {
        self.answers.get(index)
    }
}

/// The pool questions are drawn from.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Draw `count` questions without replacement.
    ///
    /// When `count` covers the whole bank the fixed sequence is returned in
    /// bank order; otherwise a partial Fisher-Yates shuffle driven by the
    /// injected random source picks the subset.
    pub fn draw(&self, count: usize, rng: &mut dyn RandomSource) -> Vec<Question> {
        if count >= self.questions.len() {
            return self.questions.clone();
        }

        let mut indices: Vec<usize> = (0..self.questions.len()).collect();
        for i in 0..count {
            let remaining = indices.len() - i;
            let j = i + (rng.next_f64() * remaining as f64) as usize;
            let j = j.min(indices.len() - 1);
            indices.swap(i, j);
        }

        indices[..count]
            .iter()
            .map(|&i| self.questions[i].clone())
            .collect()
    }

    /// The built-in Italian question pool.
    pub fn builtin() -> Self {
        use House::*;

        Self::new(vec![
            Question::new(
                "🏰 **Benvenuto a Hogwarts!** Cosa ti attira di più?",
                vec![
                    Answer::new("Mettermi alla prova", Grifondoro),
                    Answer::new("Arrivare in alto", Serpeverde),
                    Answer::new("Capire e scoprire", Corvonero),
                    Answer::new("Stare con i miei", Tassorosso),
                ],
            ),
            Question::new(
                "📚 Un compagno bara a un esame. Tu…",
                vec![
                    Answer::new("Lo affronti subito", Grifondoro),
                    Answer::new("Lo usi a tuo vantaggio", Serpeverde),
                    Answer::new("Valuti e poi decidi", Corvonero),
                    Answer::new("Cerchi una via gentile", Tassorosso),
                ],
            ),
            Question::new(
                "✨ Scegli un oggetto magico.",
                vec![
                    Answer::new("Spada antica", Grifondoro),
                    Answer::new("Anello di potere", Serpeverde),
                    Answer::new("Grimorio rarissimo", Corvonero),
                    Answer::new("Oggetto che aiuta tutti", Tassorosso),
                ],
            ),
            Question::new(
                "🌙 È notte fonda e senti un rumore nel corridoio. Tu…",
                vec![
                    Answer::new("Vai a vedere subito", Grifondoro),
                    Answer::new("Osservi di nascosto", Serpeverde),
                    Answer::new("Elenchi le spiegazioni possibili", Corvonero),
                    Answer::new("Svegli un amico per sicurezza", Tassorosso),
                ],
            ),
            Question::new(
                "🧪 A lezione di Pozioni preferisci…",
                vec![
                    Answer::new("Gli esperimenti rischiosi", Grifondoro),
                    Answer::new("Le pozioni che danno vantaggio", Serpeverde),
                    Answer::new("La teoria dietro la ricetta", Corvonero),
                    Answer::new("Lavorare in coppia", Tassorosso),
                ],
            ),
            Question::new(
                "🏆 Cosa conta di più alla fine dell'anno?",
                vec![
                    Answer::new("Le imprese memorabili", Grifondoro),
                    Answer::new("La Coppa delle Case", Serpeverde),
                    Answer::new("Quello che hai imparato", Corvonero),
                    Answer::new("Le amicizie rimaste", Tassorosso),
                ],
            ),
        ])
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::builtin()
    }
}
