//! Free-form keyword queries with embedded structured conditions.
//!
//! `"easy lake pet <3 walden"` becomes an easy, lake-side, pet-friendly
//! trail of at most three miles whose text mentions "walden".

use crate::trail::{Difficulty, Topic, Trail};

/// A parsed keyword query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrailQuery {
    /// Required difficulty.
    pub difficulty: Option<Difficulty>,
    /// Required topic.
    pub topic: Option<Topic>,
    /// Pets must be allowed.
    pub pet_friendly: bool,
    /// Camping must be allowed.
    pub camping: bool,
    /// Upper bound on length in miles.
    pub max_length: Option<f64>,
    /// Remaining lowercase tokens, all of which must appear in the trail text.
    pub text: Vec<String>,
}

impl TrailQuery {
    /// Split `input` into structured conditions and free-text tokens.
    ///
    /// Later tokens override earlier ones for the same condition.
    ///
    /// # Examples
    /// ```
    /// use trailhead_core::{Difficulty, Topic, TrailQuery};
    ///
    /// let query = TrailQuery::parse("Mod river camp <4 Charles");
    /// assert_eq!(query.difficulty, Some(Difficulty::Moderate));
    /// assert_eq!(query.topic, Some(Topic::River));
    /// assert!(query.camping);
    /// assert_eq!(query.max_length, Some(4.0));
    /// assert_eq!(query.text, vec!["charles".to_owned()]);
    /// ```
    pub fn parse(input: &str) -> Self {
        let mut query = Self::default();
        for token in input.to_lowercase().split_whitespace() {
            match token {
                "easy" => query.difficulty = Some(Difficulty::Easy),
                "moderate" | "mod" => query.difficulty = Some(Difficulty::Moderate),
                "hard" => query.difficulty = Some(Difficulty::Hard),
                "pet" | "petfriendly" => query.pet_friendly = true,
                "camp" | "camping" => query.camping = true,
                _ => {
                    if let Ok(topic) = token.parse::<Topic>() {
                        query.topic = Some(topic);
                    } else if let Some(miles) = parse_max_length(token) {
                        query.max_length = Some(miles);
                    } else {
                        query.text.push(token.to_owned());
                    }
                }
            }
        }
        query
    }

    /// Report whether the query carries no condition at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Report whether `trail` satisfies every condition.
    pub fn matches(&self, trail: &Trail) -> bool {
        if self.difficulty.is_some_and(|wanted| trail.difficulty() != wanted)
            || self.topic.is_some_and(|wanted| trail.topic() != wanted)
            || (self.pet_friendly && !trail.is_pet_friendly())
            || (self.camping && !trail.is_camping_allowed())
            || self.max_length.is_some_and(|max| trail.length() > max)
        {
            return false;
        }
        if self.text.is_empty() {
            return true;
        }
        let haystack = format!(
            "{} {} {} {}",
            trail.name(),
            trail.park(),
            trail.topic(),
            trail.state()
        )
        .to_lowercase();
        self.text.iter().all(|token| haystack.contains(token.as_str()))
    }
}

// Accepts `<N` with whole miles, or a bare decimal number.
fn parse_max_length(token: &str) -> Option<f64> {
    if let Some(digits) = token.strip_prefix('<') {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        return digits.parse().ok();
    }
    let mut parts = token.splitn(2, '.');
    let whole = parts.next()?;
    let fraction = parts.next();
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if all_digits(whole) && fraction.is_none_or(all_digits) {
        token.parse().ok()
    } else {
        None
    }
}
