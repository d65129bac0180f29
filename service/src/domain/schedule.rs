//! Daily [`Slot`] grid and availability computation.

use std::{collections::HashSet, fmt, str::FromStr, sync::LazyLock};

use common::{Date, DateTime, TimeOfDay};
use serde::{Deserialize, Serialize};

use crate::domain::booking::Sport;

/// Bookable time window of a single day.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
pub struct Slot {
    /// [`TimeOfDay`] this [`Slot`] starts at.
    pub start: TimeOfDay,

    /// [`TimeOfDay`] this [`Slot`] ends at.
    pub end: TimeOfDay,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { start, end } = self;
        write!(f, "{start} - {end}")
    }
}

impl FromStr for Slot {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) =
            s.split_once(" - ").ok_or("expected `HH:MM - HH:MM`")?;
        let slot = Self {
            start: start.parse().map_err(|_| "invalid start time")?,
            end: end.parse().map_err(|_| "invalid end time")?,
        };
        (slot.start < slot.end).then_some(slot).ok_or("inverted slot")
    }
}

/// Static grid of [`Slot`]s offered on every calendar day, in chronological
/// order.
///
/// [`Slot`]s don't overlap and leave a mid-day break between 12:00 and 14:00.
pub static TEMPLATE: LazyLock<[Slot; 7]> = LazyLock::new(|| {
    [
        ("06:00", "08:00"),
        ("08:00", "10:00"),
        ("10:00", "12:00"),
        ("14:00", "16:00"),
        ("16:00", "18:00"),
        ("18:00", "20:00"),
        ("20:00", "22:00"),
    ]
    .map(|(start, end)| Slot {
        start: TimeOfDay::parse(start).expect("valid wall-clock time"),
        end: TimeOfDay::parse(end).expect("valid wall-clock time"),
    })
});

/// [`Slot`] of a single day along with the [`Sport`]s it can still be booked
/// for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AvailableSlot {
    /// [`Slot`] itself.
    pub slot: Slot,

    /// [`Sport`]s this [`Slot`] can still be booked for.
    pub sports: Vec<Sport>,
}

/// Occupied `(start, end, sport)` triples of a single calendar day, formed by
/// its non-cancelled reservations.
pub type Occupied = HashSet<(TimeOfDay, TimeOfDay, Sport)>;

/// Computes the [`AvailableSlot`]s of the given `date`.
///
/// Walks the [`TEMPLATE`] in chronological order, dropping every [`Slot`]
/// already started by `now` when the `date` is today, and subtracting the
/// `occupied` triples from the venue's `sports`. [`Slot`]s with no bookable
/// [`Sport`] left are omitted entirely.
#[must_use]
pub fn available(
    date: Date,
    now: DateTime,
    sports: &[Sport],
    occupied: &Occupied,
) -> Vec<AvailableSlot> {
    let today = now.date();
    let time_now = now.time_of_day();

    TEMPLATE
        .iter()
        .filter(|slot| date != today || slot.start > time_now)
        .filter_map(|slot| {
            let bookable: Vec<_> = sports
                .iter()
                .filter(|sport| {
                    !occupied.contains(&(
                        slot.start,
                        slot.end,
                        (*sport).clone(),
                    ))
                })
                .cloned()
                .collect();

            (!bookable.is_empty()).then_some(AvailableSlot {
                slot: *slot,
                sports: bookable,
            })
        })
        .collect()
}

#[cfg(test)]
mod spec {
    use common::{Date, DateTime, TimeOfDay};

    use super::{available, Occupied, TEMPLATE};
    use crate::domain::booking::Sport;

    fn sports() -> Vec<Sport> {
        vec![
            Sport::new("Football").unwrap(),
            Sport::new("Cricket").unwrap(),
        ]
    }

    fn at(moment: &str) -> DateTime {
        DateTime::from_rfc3339(moment).unwrap()
    }

    #[test]
    fn round_trips_through_a_string() {
        let slot: super::Slot = "18:00 - 20:00".parse().unwrap();
        assert_eq!(slot, TEMPLATE[5]);
        assert_eq!(slot.to_string(), "18:00 - 20:00");

        assert!("20:00 - 18:00".parse::<super::Slot>().is_err());
        assert!("18:00".parse::<super::Slot>().is_err());
        assert!("6 PM - 8 PM".parse::<super::Slot>().is_err());
    }

    #[test]
    fn template_is_ordered_and_non_overlapping() {
        for pair in TEMPLATE.windows(2) {
            assert!(pair[0].start < pair[0].end);
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn offers_full_grid_on_a_future_date() {
        let date = Date::parse("2025-08-20").unwrap();
        let now = at("2025-08-18T23:59:00Z");

        let slots = available(date, now, &sports(), &Occupied::new());

        assert_eq!(slots.len(), TEMPLATE.len());
        for (offered, template) in slots.iter().zip(TEMPLATE.iter()) {
            assert_eq!(offered.slot, *template);
            assert_eq!(offered.sports, sports());
        }
    }

    #[test]
    fn drops_started_slots_on_the_current_date() {
        let date = Date::parse("2025-08-18").unwrap();

        // 10:00 slot has started, 14:00 onwards have not.
        let now = at("2025-08-18T11:30:00Z");
        let slots = available(date, now, &sports(), &Occupied::new());
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0].slot.start, TimeOfDay::parse("14:00").unwrap());

        // A slot starting exactly now is no longer offered.
        let now = at("2025-08-18T14:00:00Z");
        let slots = available(date, now, &sports(), &Occupied::new());
        assert_eq!(slots[0].slot.start, TimeOfDay::parse("16:00").unwrap());

        // Past midnight the next day is unaffected.
        let slots = available(
            date.next_day(),
            at("2025-08-18T23:00:00Z"),
            &sports(),
            &Occupied::new(),
        );
        assert_eq!(slots.len(), TEMPLATE.len());
    }

    #[test]
    fn subtracts_reserved_sports() {
        let date = Date::parse("2025-08-20").unwrap();
        let now = at("2025-08-18T08:00:00Z");
        let football = Sport::new("Football").unwrap();

        let occupied: Occupied = [(
            TimeOfDay::parse("18:00").unwrap(),
            TimeOfDay::parse("20:00").unwrap(),
            football.clone(),
        )]
        .into();

        let slots = available(date, now, &sports(), &occupied);

        assert_eq!(slots.len(), TEMPLATE.len());
        let evening = slots
            .iter()
            .find(|s| s.slot.start == TimeOfDay::parse("18:00").unwrap())
            .unwrap();
        assert_eq!(evening.sports, vec![Sport::new("Cricket").unwrap()]);
        assert!(!evening.sports.contains(&football));
    }

    #[test]
    fn omits_fully_reserved_slots() {
        let date = Date::parse("2025-08-20").unwrap();
        let now = at("2025-08-18T08:00:00Z");

        let evening_start = TimeOfDay::parse("20:00").unwrap();
        let evening_end = TimeOfDay::parse("22:00").unwrap();
        let occupied: Occupied = sports()
            .into_iter()
            .map(|sport| (evening_start, evening_end, sport))
            .collect();

        let slots = available(date, now, &sports(), &occupied);

        assert_eq!(slots.len(), TEMPLATE.len() - 1);
        assert!(slots.iter().all(|s| s.slot.start != evening_start));
    }

    #[test]
    fn returns_nothing_for_a_fully_booked_day() {
        let date = Date::parse("2025-08-20").unwrap();
        let now = at("2025-08-18T08:00:00Z");

        let occupied: Occupied = TEMPLATE
            .iter()
            .flat_map(|slot| {
                sports()
                    .into_iter()
                    .map(move |sport| (slot.start, slot.end, sport))
            })
            .collect();

        assert_eq!(available(date, now, &sports(), &occupied), vec![]);
    }
}
