//! Two-way sync between a cart card and the booking modal.
//!
//! `CardParser` reads a card's rendered text back into modal choices. Every
//! output is optional: `None` means the text did not yield a value and the
//! modal keeps what it has. `apply_snapshot` writes the modal's choices back
//! into the card in normalized form.

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::models::{CardDetails, CartLineItem};
use tourbook_catalog::{ParticipantKind, Participants, TimeSlot, TourProduct};

static WEEKDAY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{3},\s*").expect("weekday pattern"));
static ADULT_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*Adult").expect("adult pattern"));
static CHILD_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*Child").expect("child pattern"));
static INFANT_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*Infant").expect("infant pattern"));
static HOUR_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?::\d{2})?\s*(am|pm|h)?\b").expect("hour pattern")
});

const CARD_DATE_INPUTS: [&str; 3] = ["%b %d, %Y", "%B %d, %Y", "%Y-%m-%d"];

/// Modal choices recovered from a card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefillPlan {
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
    pub language: Option<String>,
    pub adults: Option<u32>,
    pub children: Option<u32>,
    pub infants: Option<u32>,
}

impl PrefillPlan {
    /// Counts to load into the modal; a missing count is the counter default
    pub fn participants(&self) -> Participants {
        Participants::new(
            self.adults.unwrap_or(1),
            self.children.unwrap_or(0),
            self.infants.unwrap_or(0),
        )
    }
}

/// Reads rendered card text against the tour's known choices
pub struct CardParser<'a> {
    product: &'a TourProduct,
}

impl<'a> CardParser<'a> {
    pub fn new(product: &'a TourProduct) -> Self {
        Self { product }
    }

    pub fn parse(&self, details: &CardDetails) -> PrefillPlan {
        let participants = details.participants_line.as_deref().unwrap_or("");
        PrefillPlan {
            date: details.date.as_deref().and_then(parse_card_date),
            time: details.time.as_deref().and_then(|t| self.match_time_slot(t)),
            language: details.language.as_deref().and_then(|l| self.match_language(l)),
            adults: parse_count(participants, ParticipantKind::Adult),
            children: parse_count(participants, ParticipantKind::Child),
            infants: parse_count(participants, ParticipantKind::Infant),
        }
    }

    /// Exact 12h/24h time first, then the slot sharing the hour of the
    /// first time-like token in the text
    pub fn match_time_slot(&self, text: &str) -> Option<TimeSlot> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let exact = NaiveTime::parse_from_str(text, "%I:%M %p")
            .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
            .ok()
            .map(TimeSlot::from)
            .filter(|slot| self.product.has_time_slot(slot));

        exact.or_else(|| {
            let hour = leading_hour(text)?;
            self.product
                .time_slots
                .iter()
                .find(|slot| slot.hour_prefix() == hour)
                .copied()
        })
    }

    pub fn match_language(&self, text: &str) -> Option<String> {
        let cleaned = text.trim_start_matches(|c: char| !c.is_alphabetic());
        self.product.find_language(cleaned).map(str::to_string)
    }
}

/// Parses `Wed, Mar 5, 2025` (weekday optional, leading icon text ignored)
pub fn parse_card_date(text: &str) -> Option<NaiveDate> {
    let cleaned = text
        .trim_start_matches(|c: char| !(c.is_alphanumeric() || c == '_'))
        .trim();
    if cleaned.is_empty() {
        return None;
    }

    let without_weekday = WEEKDAY_PREFIX.replace(cleaned, "");
    let parsed = CARD_DATE_INPUTS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&without_weekday, fmt).ok());

    if parsed.is_none() {
        tracing::warn!("Could not read card date {:?}", text);
    }
    parsed
}

/// Zero-padded 24h hour of the first `9`, `9:30 PM` or `15h` style token.
/// Minute digits never count as an hour.
fn leading_hour(text: &str) -> Option<String> {
    let caps = HOUR_TOKEN.captures(text)?;
    let mut hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
        Some("pm") if hour < 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        _ => {}
    }
    Some(format!("{:02}", hour))
}

fn parse_count(text: &str, kind: ParticipantKind) -> Option<u32> {
    let pattern = match kind {
        ParticipantKind::Adult => &ADULT_COUNT,
        ParticipantKind::Child => &CHILD_COUNT,
        ParticipantKind::Infant => &INFANT_COUNT,
    };

    let digits = pattern.captures(text)?.get(1)?.as_str();
    match digits.parse::<u32>() {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::warn!("Could not read {:?} count from {:?}: {}", kind, text, e);
            None
        }
    }
}

/// Card date text, e.g. `Wed, Mar 5, 2025`
pub fn format_card_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// Combined participants line: adults always, children and infants only
/// when present. `2 Adults, 1 Child`
pub fn participants_line(participants: &Participants) -> String {
    fn part(n: u32, singular: &str, plural: &str) -> String {
        format!("{} {}", n, if n > 1 { plural } else { singular })
    }

    let mut parts = vec![part(participants.adults(), "Adult", "Adults")];
    if participants.children() > 0 {
        parts.push(part(participants.children(), "Child", "Children"));
    }
    if participants.infants() > 0 {
        parts.push(part(participants.infants(), "Infant", "Infants"));
    }
    parts.join(", ")
}

/// What the booking modal currently shows, read when an edit is saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalSnapshot {
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
    pub language: Option<String>,
    pub participants: Participants,
    pub option_title: Option<String>,
    /// Add-ons with a positive quantity, in modal order
    pub addons: Vec<(String, u32)>,
}

impl ModalSnapshot {
    pub fn addons_text(&self) -> Option<String> {
        if self.addons.is_empty() {
            return None;
        }
        Some(
            self.addons
                .iter()
                .map(|(name, qty)| format!("{} x{}", name, qty))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// Writes the modal's choices into a card and recomputes its traveler count
pub fn apply_snapshot(item: &mut CartLineItem, snapshot: &ModalSnapshot) {
    let details = &mut item.details;

    if let (Some(line), Some(date)) = (details.date.as_mut(), snapshot.date) {
        *line = format_card_date(date);
    }
    if let (Some(line), Some(time)) = (details.time.as_mut(), snapshot.time) {
        *line = time.to_12h();
    }
    if let (Some(line), Some(language)) = (details.language.as_mut(), snapshot.language.as_ref()) {
        *line = language.clone();
    }
    if let Some(line) = details.participants_line.as_mut() {
        *line = participants_line(&snapshot.participants);
    }
    if let (Some(line), Some(title)) = (details.option_title.as_mut(), snapshot.option_title.as_ref()) {
        *line = title.clone();
    }
    details.addons_line = snapshot.addons_text();

    item.travelers = snapshot.participants.total().max(1);
}
