// src/seed.rs

//! Data the question bank starts with.

use crate::models::{
    category::Category,
    question::{Difficulty, Question},
};

/// The standard exam categories.
pub fn default_categories() -> Vec<Category> {
    [
        ("loksewa", "लोकसेवा तयारी (Loksewa)", "📜"),
        ("banking", "Banking & Finance", "🏦"),
        ("english", "English Grammar", "📖"),
        ("gk", "सामान्य ज्ञान (GK)", "🌍"),
        ("iq", "IQ & Reasoning", "🧩"),
        ("math", "Math / Quantitative", "🔢"),
        ("current_affairs", "Current Affairs", "📰"),
    ]
    .into_iter()
    .map(|(id, name, icon)| Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        enabled: true,
        max_questions: None,
    })
    .collect()
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    category: &str,
    question: &str,
    options: [&str; 4],
    correct_answer: u8,
    explanation: &str,
    difficulty: Difficulty,
    hint: Option<&str>,
) -> Question {
    Question {
        id: id.to_string(),
        category: category.to_string(),
        sub_category: None,
        question: question.to_string(),
        options: options.map(str::to_string),
        correct_answer,
        explanation: explanation.to_string(),
        hint: hint.map(str::to_string),
        difficulty,
        reference: None,
    }
}

/// A handful of questions so a fresh instance is usable.
pub fn sample_questions() -> Vec<Question> {
    vec![
        sample(
            "1",
            "gk",
            "Where is the birthplace of Gautama Buddha?",
            ["Sarnath, India", "Lumbini, Nepal", "Bodh Gaya, India", "Kushinagar, India"],
            1,
            "Siddhartha Gautama, the Lord Buddha, was born in 623 B.C. in the famous gardens of Lumbini, which soon became a place of pilgrimage.",
            Difficulty::Easy,
            Some("It is a UNESCO World Heritage Site in the Rupandehi District."),
        ),
        sample(
            "n1",
            "gk",
            "नेपालको सबैभन्दा लामो नदी कुन हो?",
            ["कोशी", "गण्डकी", "कर्णाली", "बागमती"],
            2,
            "कर्णाली नेपालको सबैभन्दा लामो नदी हो।",
            Difficulty::Easy,
            None,
        ),
        sample(
            "3",
            "loksewa",
            "नेपालको वर्तमान संविधान कहिले जारी भएको हो?",
            ["२०७२ असोज ३", "२०७० माघ १", "२०७२ भदौ १", "२०७३ असोज ३"],
            0,
            "नेपालको संविधान २०७२ साल असोज ३ गते जारी भएको हो।",
            Difficulty::Medium,
            None,
        ),
        sample(
            "4",
            "iq",
            "If CAT is coded as 3120, how is DOG coded?",
            ["4157", "4151", "5168", "3157"],
            0,
            "C=3, A=1, T=20. Similarly, D=4, O=15, G=7. So, DOG = 4157.",
            Difficulty::Medium,
            None,
        ),
    ]
}
