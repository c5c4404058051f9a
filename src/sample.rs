/// How many values the datetime format detector looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatSampling {
    /// Only the first non-missing value decides the format.
    ///
    /// # Warning
    ///
    /// A column mixing date-only and timestamped rows gets whichever
    /// format its first row happens to carry.
    #[default]
    First,
    /// Look at up to this many leading non-missing values; any value with a
    /// non-midnight time selects the date-plus-time format.
    Leading(usize),
}

impl FormatSampling {
    /// Returns the number of leading values to inspect (at least 1).
    pub fn values(&self) -> usize {
        match self {
            FormatSampling::First => 1,
            FormatSampling::Leading(n) => (*n).max(1),
        }
    }
}

/// Date format preference for ambiguous date parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePreference {
    /// Day-Month-Year format (e.g., 31/12/2023).
    DmyFormat,
    /// Month-Day-Year format (e.g., 12/31/2023).
    #[default]
    MdyFormat,
}

impl DatePreference {
    /// Returns true if day comes before month in ambiguous dates.
    pub fn is_dmy(&self) -> bool {
        matches!(self, DatePreference::DmyFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sampling_values() {
        assert_eq!(FormatSampling::default(), FormatSampling::First);
        assert_eq!(FormatSampling::First.values(), 1);
        assert_eq!(FormatSampling::Leading(5).values(), 5);
        assert_eq!(FormatSampling::Leading(0).values(), 1);
    }

    #[test]
    fn test_date_preference_default() {
        assert!(!DatePreference::default().is_dmy());
        assert!(DatePreference::DmyFormat.is_dmy());
    }
}
