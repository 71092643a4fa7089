//! Packed event dates.
//!
//! An event date is an 8-byte sub-field sitting right after the 18-byte event
//! prefix:
//!
//! ```text
//! +18  u16  sub-field total length (must be 8)
//! +20  u16  sub-field tag
//! +22  u8   precision flags
//! +23  u8   bits 7-6: month offset in group, bits 5-0: day (0 = unknown)
//! +24  u16  (year + 8000) * 4 + group
//! ```
//!
//! Months come in four bands selected by `group`; `month = group * 4 + offset`.
//! Group 0 covers months 1-3, group 1 months 4-7, group 2 months 8-11, and
//! group 3 month 12.

use std::fmt;

use crate::codec::primitives::u16_le;
use crate::limits::{EVENT_FIXED_PREFIX_LEN, SHORT_SUB_FIELD_LEN};

const YEAR_BIAS: i32 = 8000;

const FLAG_AFTER: u8 = 0x40;
const FLAG_BEFORE: u8 = 0x80;
const MASK_YEAR_ONLY: u8 = 0xA0;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Qualifier printed in front of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateQualifier {
    Exact,
    About,
    After,
    Before,
}

impl DateQualifier {
    fn prefix(self) -> &'static str {
        match self {
            DateQualifier::Exact => "",
            DateQualifier::About => "about ",
            DateQualifier::After => "after ",
            DateQualifier::Before => "before ",
        }
    }
}

/// A decoded event date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedDate {
    pub year: u16,
    /// 1-12.
    pub month: u8,
    /// 0 when unknown.
    pub day: u8,
    pub qualifier: DateQualifier,
    /// Only the year is meaningful; month is a filler value.
    pub year_only: bool,
}

impl PackedDate {
    /// Unpacks the flag byte, the day/offset byte and the year/group word.
    ///
    /// Returns `None` when the year falls outside 1..=9999 or the month outside 1..=12.
    pub fn unpack(flags: u8, day_byte: u8, year_group: u16) -> Option<Self> {
        let year = i32::from(year_group / 4) - YEAR_BIAS;
        let group = year_group % 4;
        let month = group * 4 + u16::from(day_byte >> 6);
        let day = day_byte & 0x3F;

        if !(1..=9999).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }

        let year_only = flags & MASK_YEAR_ONLY == MASK_YEAR_ONLY;
        let qualifier = if flags & FLAG_AFTER != 0 {
            DateQualifier::After
        } else if year_only {
            DateQualifier::About
        } else if flags & MASK_YEAR_ONLY == FLAG_BEFORE {
            DateQualifier::Before
        } else {
            DateQualifier::Exact
        };

        Some(Self {
            year: year as u16,
            month: month as u8,
            day,
            qualifier,
            year_only,
        })
    }

    /// Reads the date sub-field of an event payload.
    ///
    /// The sub-field must be present at the fixed offset with a total length of
    /// exactly 8; anything else means the event carries no date.
    pub fn from_event_data(event: &[u8]) -> Option<Self> {
        let at = EVENT_FIXED_PREFIX_LEN;
        if event.len() < at + SHORT_SUB_FIELD_LEN as usize {
            return None;
        }
        if u16_le(event, at).ok()? != SHORT_SUB_FIELD_LEN {
            return None;
        }
        let year_group = u16_le(event, at + 6).ok()?;
        Self::unpack(event[at + 4], event[at + 5], year_group)
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[usize::from(self.month.clamp(1, 12)) - 1]
    }
}

impl fmt::Display for PackedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.qualifier.prefix();
        if self.year_only {
            write!(f, "{prefix}{}", self.year)
        } else if (1..=31).contains(&self.day) {
            write!(f, "{prefix}{} {} {}", self.day, self.month_name(), self.year)
        } else {
            write!(f, "{prefix}{} {}", self.month_name(), self.year)
        }
    }
}

/// Renders the date of an event payload, or an empty string when it has none.
pub fn format_event_date(event: &[u8]) -> String {
    PackedDate::from_event_data(event)
        .map(|d| d.to_string())
        .unwrap_or_default()
}
