//! Keyword intent classifier backing the mock answer provider.
//!
//! Each recognized intent maps to a canned prospectus answer and the pages
//! it would cite. Anything else gets an echo reply citing page 1.

use crate::provider::Answer;

/// Topic a question is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Who leads the university.
    ViceChancellor,
    /// Entry requirements.
    Admission,
    /// Tuition and fees.
    Fees,
    /// Courses and programs offered.
    Programs,
    /// No keyword matched.
    Unrecognized,
}

const VICE_CHANCELLOR_ANSWER: &str = "The Vice Chancellor of Igbinedion University Okada is \
    Prof. Lawrence Ezemonye. He has been serving in this capacity and brings extensive \
    experience in academic leadership.";

const ADMISSION_ANSWER: &str = "Admission requirements vary by program. Generally, candidates \
    need a minimum of 5 O'level credits including English and Mathematics. JAMB UTME score \
    requirements differ by course.";

const FEES_ANSWER: &str = "Tuition fees vary by faculty and program. For specific fee \
    information, please refer to the current fee schedule in the prospectus or contact the \
    bursary department.";

const PROGRAMS_ANSWER: &str = "IUO offers a wide range of undergraduate and postgraduate \
    programs across multiple faculties including Medicine, Law, Engineering, Arts, Sciences, \
    and Social Sciences.";

/// Keyword table, checked in order; the first hit wins.
const KEYWORDS: &[(Intent, &[&str])] = &[
    (Intent::ViceChancellor, &["vice chancellor", "vc"]),
    (Intent::Admission, &["admission", "requirements"]),
    (Intent::Fees, &["fees", "tuition"]),
    (Intent::Programs, &["courses", "programs"]),
];

impl Intent {
    /// Classify a question by case-insensitive substring match.
    pub fn classify(question: &str) -> Self {
        let lower = question.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
            .map_or(Self::Unrecognized, |(intent, _)| *intent)
    }

    /// Pages cited by the canned answer.
    pub fn sources(self) -> Vec<u32> {
        match self {
            Self::ViceChancellor => vec![5, 12],
            Self::Admission => vec![15, 16, 17],
            Self::Fees => vec![45, 46],
            Self::Programs => vec![20, 21, 22],
            Self::Unrecognized => vec![1],
        }
    }

    /// Build the canned answer. `question` is only used by the echo reply.
    pub fn respond(self, question: &str) -> Answer {
        let answer = match self {
            Self::ViceChancellor => VICE_CHANCELLOR_ANSWER.to_string(),
            Self::Admission => ADMISSION_ANSWER.to_string(),
            Self::Fees => FEES_ANSWER.to_string(),
            Self::Programs => PROGRAMS_ANSWER.to_string(),
            Self::Unrecognized => format!(
                "I received your question: \"{question}\". This is a mock response. When \
                 connected to the real API, I'll search the prospectus and give you accurate \
                 information!"
            ),
        };

        Answer::new(answer, self.sources())
    }
}
