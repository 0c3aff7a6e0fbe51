//! Training intent detection
//!
//! A drill's intent selects which semantic checks apply. An explicit
//! `intent` tag on the drill wins; otherwise intents are inferred from
//! keywords in the coaching goal, name and description. Several intents can
//! match at once ("crossing and finishing").

use crate::models::{Drill, Intent};
use regex::Regex;
use std::sync::OnceLock;

/// Keyword patterns per intent, matched case-insensitively on word
/// boundaries ("across" is not a cross, "striker" is not a strike).
const KEYWORDS: &[(Intent, &str)] = &[
    (Intent::Finishing, r"finish\w*|shoot\w*|shots?|scoring|strik(e|es|ing)"),
    (Intent::Passing, r"pass(es|ed|ing)?|combinations?|one-twos?"),
    (Intent::Dribbling, r"dribbl\w*|1v1|take on|beat(s|ing)?"),
    (Intent::Crossing, r"cross(es|ed|ing)?|wide play"),
    (Intent::Defending, r"defend\w*|pressure|pressing"),
];

fn keyword_regexes() -> &'static [(Intent, Regex)] {
    static KEYWORD_RES: OnceLock<Vec<(Intent, Regex)>> = OnceLock::new();
    KEYWORD_RES.get_or_init(|| {
        KEYWORDS
            .iter()
            .filter_map(|(intent, words)| {
                Regex::new(&format!(r"(?i)\b(?:{})\b", words)).ok().map(|re| (*intent, re))
            })
            .collect()
    })
}

/// Intents whose keywords appear in `text`, in [`Intent::ALL`] order.
pub fn infer(text: &str) -> Vec<Intent> {
    keyword_regexes()
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(intent, _)| *intent)
        .collect()
}

/// Intents that apply to `drill`, optionally considering the coaching goal
/// it was generated from.
pub fn detect(drill: &Drill, goal: Option<&str>) -> Vec<Intent> {
    if let Some(intent) = drill.intent {
        return vec![intent];
    }
    let mut text = String::new();
    if let Some(goal) = goal {
        text.push_str(goal);
        text.push('\n');
    }
    text.push_str(&drill.name);
    text.push('\n');
    text.push_str(&drill.description);
    infer(&text)
}
