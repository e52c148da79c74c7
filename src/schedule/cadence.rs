use serde::{Deserialize, Serialize};

pub const MAX_CUSTOM_DAYS: usize = 10;
pub const DEFAULT_TWICE_MONTHLY_DAYS: [u32; 2] = [1, 15];

/// Cadence tag as it appears on incoming records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CadenceKind {
    Weekly,
    #[serde(rename = "every_2_weeks", alias = "biweekly")]
    EveryTwoWeeks,
    Monthly,
    TwiceMonthly,
    Custom,
}

/// How often a pay event repeats.
///
/// Day-of-month cadences hold 1-based days, sorted and free of duplicates.
/// Deserialized day lists go through the same sanitising constructors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case", from = "RawCadence")]
pub enum Cadence {
    Weekly,
    EveryTwoWeeks,
    Monthly,
    TwiceMonthly { days: [u32; 2] },
    Custom { days: Vec<u32> },
}

impl Cadence {
    /// Twice-monthly cadence; falls back to the 1st and 15th unless both days are valid.
    pub fn twice_monthly(first: u32, second: u32) -> Self {
        let days = if is_day_of_month(first) && is_day_of_month(second) && first != second {
            [first.min(second), first.max(second)]
        } else {
            tracing::debug!(first, second, "twice-monthly days rejected, using defaults");
            DEFAULT_TWICE_MONTHLY_DAYS
        };
        Cadence::TwiceMonthly { days }
    }

    /// Custom day set. Out-of-range days are dropped and at most ten are kept.
    pub fn custom(days: impl IntoIterator<Item = u32>) -> Self {
        let mut days: Vec<u32> = days.into_iter().filter(|d| is_day_of_month(*d)).collect();
        days.sort_unstable();
        days.dedup();
        days.truncate(MAX_CUSTOM_DAYS);
        Cadence::Custom { days }
    }

    /// Builds the cadence described by a record tag and its optional day lists.
    pub fn from_parts(
        kind: CadenceKind,
        monthly_days: Option<&[u32]>,
        custom_days: Option<&[u32]>,
    ) -> Self {
        match kind {
            CadenceKind::Weekly => Cadence::Weekly,
            CadenceKind::EveryTwoWeeks => Cadence::EveryTwoWeeks,
            CadenceKind::Monthly => Cadence::Monthly,
            CadenceKind::TwiceMonthly => match monthly_days {
                Some([first, second, ..]) => Cadence::twice_monthly(*first, *second),
                _ => Cadence::TwiceMonthly {
                    days: DEFAULT_TWICE_MONTHLY_DAYS,
                },
            },
            CadenceKind::Custom => Cadence::custom(custom_days.unwrap_or_default().iter().copied()),
        }
    }

    pub fn kind(&self) -> CadenceKind {
        match self {
            Cadence::Weekly => CadenceKind::Weekly,
            Cadence::EveryTwoWeeks => CadenceKind::EveryTwoWeeks,
            Cadence::Monthly => CadenceKind::Monthly,
            Cadence::TwiceMonthly { .. } => CadenceKind::TwiceMonthly,
            Cadence::Custom { .. } => CadenceKind::Custom,
        }
    }

    /// Fixed stride in days for weekly-style cadences.
    pub fn step_days(&self) -> Option<i64> {
        match self {
            Cadence::Weekly => Some(7),
            Cadence::EveryTwoWeeks => Some(14),
            _ => None,
        }
    }

    /// Configured days of month for day-set cadences.
    pub fn days_of_month(&self) -> Option<&[u32]> {
        match self {
            Cadence::TwiceMonthly { days } => Some(days),
            Cadence::Custom { days } => Some(days),
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Cadence::Weekly => "Weekly".into(),
            Cadence::EveryTwoWeeks => "Every 2 Weeks".into(),
            Cadence::Monthly => "Monthly".into(),
            Cadence::TwiceMonthly { days } => format!("Twice Monthly ({} & {})", days[0], days[1]),
            Cadence::Custom { days } if days.is_empty() => "Custom".into(),
            Cadence::Custom { days } => {
                let listed: Vec<String> = days.iter().map(u32::to_string).collect();
                format!("Custom ({})", listed.join(", "))
            }
        }
    }
}

/// Unchecked wire shape of [`Cadence`].
#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RawCadence {
    Weekly,
    EveryTwoWeeks,
    Monthly,
    TwiceMonthly {
        #[serde(default)]
        days: Vec<u32>,
    },
    Custom {
        #[serde(default)]
        days: Vec<u32>,
    },
}

impl From<RawCadence> for Cadence {
    fn from(raw: RawCadence) -> Self {
        match raw {
            RawCadence::Weekly => Cadence::Weekly,
            RawCadence::EveryTwoWeeks => Cadence::EveryTwoWeeks,
            RawCadence::Monthly => Cadence::Monthly,
            RawCadence::TwiceMonthly { days } => {
                Cadence::from_parts(CadenceKind::TwiceMonthly, Some(&days), None)
            }
            RawCadence::Custom { days } => Cadence::custom(days),
        }
    }
}

fn is_day_of_month(day: u32) -> bool {
    (1..=31).contains(&day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_days_are_sanitized() {
        let cadence = Cadence::custom([31, 0, 5, 5, 40, 12]);
        assert_eq!(cadence.days_of_month(), Some(&[5, 12, 31][..]));

        let many = Cadence::custom(1..=20);
        assert_eq!(many.days_of_month().map(<[u32]>::len), Some(MAX_CUSTOM_DAYS));
    }

    #[test]
    fn twice_monthly_falls_back_to_defaults() {
        assert_eq!(
            Cadence::twice_monthly(20, 5),
            Cadence::TwiceMonthly { days: [5, 20] }
        );
        assert_eq!(
            Cadence::twice_monthly(0, 15),
            Cadence::TwiceMonthly {
                days: DEFAULT_TWICE_MONTHLY_DAYS
            }
        );
        assert_eq!(
            Cadence::from_parts(CadenceKind::TwiceMonthly, None, None),
            Cadence::TwiceMonthly {
                days: DEFAULT_TWICE_MONTHLY_DAYS
            }
        );
    }

    #[test]
    fn kind_tags_deserialize_from_record_names() {
        let kind: CadenceKind = serde_json::from_str("\"every_2_weeks\"").unwrap();
        assert_eq!(kind, CadenceKind::EveryTwoWeeks);
        let alias: CadenceKind = serde_json::from_str("\"biweekly\"").unwrap();
        assert_eq!(alias, CadenceKind::EveryTwoWeeks);
        let twice: CadenceKind = serde_json::from_str("\"twice_monthly\"").unwrap();
        assert_eq!(twice, CadenceKind::TwiceMonthly);
    }

    #[test]
    fn deserialized_day_lists_are_sanitized() {
        let custom: Cadence = serde_json::from_str(r#"{"kind":"custom","days":[20,5,5,0]}"#).unwrap();
        assert_eq!(custom, Cadence::Custom { days: vec![5, 20] });

        let twice: Cadence =
            serde_json::from_str(r#"{"kind":"twice_monthly","days":[0,15]}"#).unwrap();
        assert_eq!(
            twice,
            Cadence::TwiceMonthly {
                days: DEFAULT_TWICE_MONTHLY_DAYS
            }
        );

        let swapped: Cadence =
            serde_json::from_str(r#"{"kind":"twice_monthly","days":[25,10]}"#).unwrap();
        assert_eq!(swapped, Cadence::TwiceMonthly { days: [10, 25] });
    }

    #[test]
    fn serialized_cadence_reads_back() {
        let cadence = Cadence::custom([3, 18]);
        let json = serde_json::to_string(&cadence).unwrap();
        assert_eq!(json, r#"{"kind":"custom","days":[3,18]}"#);
        let weekly: Cadence = serde_json::from_str(r#"{"kind":"every_two_weeks"}"#).unwrap();
        assert_eq!(weekly, Cadence::EveryTwoWeeks);
    }

    #[test]
    fn label_generation() {
        assert_eq!(Cadence::Weekly.label(), "Weekly");
        assert_eq!(Cadence::EveryTwoWeeks.label(), "Every 2 Weeks");
        assert_eq!(Cadence::twice_monthly(1, 15).label(), "Twice Monthly (1 & 15)");
        assert_eq!(Cadence::custom([3, 18]).label(), "Custom (3, 18)");
        assert_eq!(Cadence::custom([]).label(), "Custom");
    }
}
