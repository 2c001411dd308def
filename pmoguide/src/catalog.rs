//! Channel catalog: the static dataset and its read-only queries
//!
//! The catalog is built once at startup — either the built-in production
//! line-up or an injected list (tests) — and validated up front so the
//! resolver can rely on the schedule invariants for the whole process
//! lifetime. Nothing is ever mutated after construction.

use crate::error::{Error, Result};
use crate::models::{Channel, ChannelListing, Group, ProgramWindow, ALL_GROUP};
use crate::schedule::{self, MIDNIGHT};
use chrono::NaiveDateTime;

/// Immutable channel dataset, validated at construction
#[derive(Debug, Clone)]
pub struct Catalog {
    channels: Vec<Channel>,
}

impl Catalog {
    /// Build a catalog, checking every channel's schedule invariants
    ///
    /// Each channel must carry a non-empty grid that starts at
    /// `"00:00:00"`, ends at `"00:00:00"` and is contiguous. Rejecting a
    /// bad dataset here keeps per-request resolution infallible on valid
    /// data.
    pub fn new(channels: Vec<Channel>) -> Result<Self> {
        for channel in &channels {
            validate_schedule(channel)?;
        }
        Ok(Self { channels })
    }

    /// The fixed production line-up
    pub fn builtin() -> Self {
        Self::new(builtin_channels()).expect("builtin catalog violates schedule invariants")
    }

    /// All channels, in catalog order
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// All distinct group labels, ascending, with the synthetic group first
    ///
    /// The sort is a plain byte-wise string sort, locale-agnostic.
    pub fn groups(&self) -> Vec<Group> {
        let mut labels: Vec<&str> = self
            .channels
            .iter()
            .flat_map(|c| c.groups.iter().map(String::as_str))
            .collect();
        labels.sort_unstable();
        labels.dedup();

        let mut groups = Vec::with_capacity(labels.len() + 1);
        groups.push(Group::from_label(ALL_GROUP));
        groups.extend(labels.into_iter().map(Group::from_label));
        groups
    }

    /// Channels belonging to `group_id`, optionally with their resolved window
    ///
    /// `"all"` matches every channel. An empty result is a
    /// [`Error::GroupNotFound`], mirroring the HTTP 404 contract.
    pub fn group_channels(
        &self,
        group_id: &str,
        now: NaiveDateTime,
        with_program: bool,
    ) -> Result<Vec<ChannelListing>> {
        let members = self
            .channels
            .iter()
            .filter(|c| group_id == ALL_GROUP || c.in_group(group_id));

        let mut listings = Vec::new();
        for channel in members {
            let program = if with_program {
                Some(schedule::resolve_current_and_next(now, &channel.program)?)
            } else {
                None
            };
            listings.push(ChannelListing {
                id: channel.id.clone(),
                name: channel.name.clone(),
                icon: channel.icon.clone(),
                groups: channel.groups.clone(),
                program,
            });
        }

        if listings.is_empty() {
            return Err(Error::GroupNotFound(group_id.to_string()));
        }
        Ok(listings)
    }

    /// The resolved current/next window for one channel
    pub fn channel_program(&self, channel_id: &str, now: NaiveDateTime) -> Result<ProgramWindow> {
        let channel = self
            .channels
            .iter()
            .find(|c| c.id == channel_id)
            .ok_or_else(|| Error::ChannelNotFound(channel_id.to_string()))?;
        schedule::resolve_current_and_next(now, &channel.program)
    }
}

/// Check one channel's grid against the full-day invariants
fn validate_schedule(channel: &Channel) -> Result<()> {
    let programs = &channel.program;
    let (Some(first), Some(last)) = (programs.first(), programs.last()) else {
        return Err(Error::EmptySchedule(channel.id.clone()));
    };
    if first.start_time != MIDNIGHT {
        return Err(Error::ScheduleNotAnchored(
            channel.id.clone(),
            first.start_time.clone(),
        ));
    }
    if last.end_time != MIDNIGHT {
        return Err(Error::ScheduleNotClosed(
            channel.id.clone(),
            last.end_time.clone(),
        ));
    }
    for pair in programs.windows(2) {
        if pair[0].start_time >= pair[1].start_time {
            return Err(Error::ScheduleNotOrdered(
                channel.id.clone(),
                pair[0].start_time.clone(),
                pair[1].start_time.clone(),
            ));
        }
        if pair[0].end_time != pair[1].start_time {
            return Err(Error::ScheduleNotContiguous(
                channel.id.clone(),
                pair[0].end_time.clone(),
                pair[1].start_time.clone(),
            ));
        }
    }
    Ok(())
}

/// The built-in production channels
///
/// Icons live under `public/` in the PMOTV binary crate and are served at
/// the paths recorded here.
fn builtin_channels() -> Vec<Channel> {
    vec![
        Channel::new("one", "PMO One", "/public/one.png")
            .with_group("Entertainment")
            .with_group("News")
            .with_slot("Night Loop", "00:00:00", "06:00:00")
            .with_slot("Sunrise Report", "06:00:00", "09:00:00")
            .with_slot("Morning Magazine", "09:00:00", "12:00:00")
            .with_slot("Midday News", "12:00:00", "14:00:00")
            .with_slot("Afternoon Talk", "14:00:00", "18:00:00")
            .with_slot("Evening News", "18:00:00", "20:00:00")
            .with_slot("Prime Time Show", "20:00:00", "23:00:00")
            .with_slot("Late Night", "23:00:00", "00:00:00"),
        Channel::new("cinema", "PMO Cinema", "/public/cinema.png")
            .with_group("Entertainment")
            .with_group("Movies")
            .with_slot("Night Classics", "00:00:00", "06:00:00")
            .with_slot("Breakfast Shorts", "06:00:00", "08:00:00")
            .with_slot("Family Matinee", "08:00:00", "12:00:00")
            .with_slot("Double Feature", "12:00:00", "16:00:00")
            .with_slot("Director's Cut", "16:00:00", "20:00:00")
            .with_slot("Evening Premiere", "20:00:00", "22:30:00")
            .with_slot("Midnight Horror", "22:30:00", "00:00:00"),
        Channel::new("sport", "PMO Sport", "/public/sport.png")
            .with_group("Sports")
            .with_slot("Replay Zone", "00:00:00", "07:00:00")
            .with_slot("Morning Workout", "07:00:00", "09:00:00")
            .with_slot("Club Football", "09:00:00", "13:00:00")
            .with_slot("Live Arena", "13:00:00", "18:00:00")
            .with_slot("Sports Tonight", "18:00:00", "21:00:00")
            .with_slot("Boxing Night", "21:00:00", "00:00:00"),
        Channel::new("junior", "PMO Junior", "/public/junior.png")
            .with_group("Kids")
            .with_slot("Sleepy Tales", "00:00:00", "07:00:00")
            .with_slot("Cartoon Breakfast", "07:00:00", "12:00:00")
            .with_slot("Puzzle Hour", "12:00:00", "13:00:00")
            .with_slot("Adventure Club", "13:00:00", "18:00:00")
            .with_slot("Bedtime Stories", "18:00:00", "20:00:00")
            .with_slot("Quiet Night", "20:00:00", "00:00:00"),
        Channel::new("hits", "PMO Hits", "/public/hits.png")
            .with_group("Entertainment")
            .with_group("Music")
            .with_slot("Night Grooves", "00:00:00", "06:00:00")
            .with_slot("Wake-Up Mix", "06:00:00", "10:00:00")
            .with_slot("Top 40 Countdown", "10:00:00", "14:00:00")
            .with_slot("Request Line", "14:00:00", "19:00:00")
            .with_slot("Live Session", "19:00:00", "22:00:00")
            .with_slot("Club Anthems", "22:00:00", "00:00:00"),
        Channel::new("news24", "PMO News 24", "/public/news24.png")
            .with_group("News")
            .with_slot("Overnight Desk", "00:00:00", "06:00:00")
            .with_slot("Morning Headlines", "06:00:00", "12:00:00")
            .with_slot("Midday Briefing", "12:00:00", "18:00:00")
            .with_slot("Evening Wrap", "18:00:00", "00:00:00"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Program;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    fn small_catalog() -> Catalog {
        Catalog::new(vec![
            Channel::new("one", "Channel One", "/public/one.png")
                .with_group("Group B")
                .with_group("Group A")
                .with_slot("Night on One", "00:00:00", "06:00:00")
                .with_slot("Morning on One", "06:00:00", "12:00:00")
                .with_slot("Day on One", "12:00:00", "18:00:00")
                .with_slot("Evening on One", "18:00:00", "00:00:00"),
            Channel::new("two", "Channel Two", "/public/two.png")
                .with_group("Group C")
                .with_group("Group A")
                .with_slot("Night on Two", "00:00:00", "12:00:00")
                .with_slot("Day on Two", "12:00:00", "00:00:00"),
        ])
        .unwrap()
    }

    #[test]
    fn test_groups_start_with_all_and_are_sorted() {
        let groups = small_catalog().groups();
        let labels: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(labels, vec![ALL_GROUP, "Group A", "Group B", "Group C"]);
    }

    #[test]
    fn test_groups_have_no_duplicates() {
        let groups = Catalog::builtin().groups();
        let mut labels: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        let before = labels.len();
        labels.dedup();
        assert_eq!(labels.len(), before);
        assert_eq!(labels[0], ALL_GROUP);
    }

    #[test]
    fn test_all_group_lists_every_channel_without_program() {
        let catalog = small_catalog();
        let listings = catalog.group_channels(ALL_GROUP, noon(), false).unwrap();
        assert_eq!(listings.len(), catalog.channels().len());
        assert!(listings.iter().all(|l| l.program.is_none()));
    }

    #[test]
    fn test_group_filter_matches_membership() {
        let listings = small_catalog()
            .group_channels("Group B", noon(), false)
            .unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, "one");
    }

    #[test]
    fn test_group_lineup_with_program() {
        let listings = small_catalog()
            .group_channels("Group A", noon(), true)
            .unwrap();
        assert_eq!(listings.len(), 2);
        let window = listings[0].program.as_ref().unwrap();
        assert_eq!(window.current.name, "Day on One");
        assert_eq!(window.next.name, "Evening on One");
    }

    #[test]
    fn test_unknown_group_is_not_found() {
        let err = small_catalog()
            .group_channels("Nope", noon(), false)
            .unwrap_err();
        assert!(matches!(err, Error::GroupNotFound(_)));
    }

    #[test]
    fn test_channel_program_resolves_window() {
        let window = small_catalog().channel_program("two", noon()).unwrap();
        assert_eq!(window.current.name, "Day on Two");
        assert_eq!(window.next.name, "Night on Two");
        assert_eq!(window.current.end_time, "2025-03-15T00:00:00");
    }

    #[test]
    fn test_unknown_channel_is_not_found() {
        let err = small_catalog().channel_program("zzz", noon()).unwrap_err();
        assert!(matches!(err, Error::ChannelNotFound(_)));
    }

    #[test]
    fn test_empty_schedule_is_rejected() {
        let err = Catalog::new(vec![Channel::new("bare", "Bare", "/public/bare.png")]).unwrap_err();
        assert!(matches!(err, Error::EmptySchedule(_)));
    }

    #[test]
    fn test_unanchored_schedule_is_rejected() {
        let err = Catalog::new(vec![Channel::new("late", "Late", "/public/late.png")
            .with_slot("Afternoon", "12:00:00", "00:00:00")])
        .unwrap_err();
        assert!(matches!(err, Error::ScheduleNotAnchored(_, _)));
    }

    #[test]
    fn test_open_ended_schedule_is_rejected() {
        let err = Catalog::new(vec![Channel::new("open", "Open", "/public/open.png")
            .with_slot("Morning", "00:00:00", "12:00:00")])
        .unwrap_err();
        assert!(matches!(err, Error::ScheduleNotClosed(_, _)));
    }

    #[test]
    fn test_gapped_schedule_is_rejected() {
        let channel = Channel {
            id: "gap".into(),
            name: "Gap".into(),
            icon: "/public/gap.png".into(),
            groups: vec![],
            program: vec![
                Program::new("A", "00:00:00", "06:00:00"),
                Program::new("B", "08:00:00", "00:00:00"),
            ],
        };
        let err = Catalog::new(vec![channel]).unwrap_err();
        assert!(matches!(err, Error::ScheduleNotContiguous(_, _, _)));
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        assert!(!catalog.channels().is_empty());
        // Every channel resolves at an arbitrary instant.
        for channel in catalog.channels() {
            catalog.channel_program(&channel.id, noon()).unwrap();
        }
    }
}
