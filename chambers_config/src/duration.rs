use std::ops::Deref;

use serde::Deserialize;

/// Duration given as whitespace separated parts with a unit suffix, e.g.
/// `"15m"` or `"1d 12h"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.split_whitespace()
            .map(parse_part)
            .try_fold(0, |acc, part| Some(acc + part?))
            .map(|secs| Self(std::time::Duration::from_secs(secs)))
            .ok_or_else(|| serde::de::Error::custom("Invalid duration"))
    }
}

fn parse_part(part: &str) -> Option<u64> {
    let unit = part.chars().last()?;
    let number = part[..part.len() - unit.len_utf8()].parse::<u64>().ok()?;
    let unit = match unit {
        's' => 1,
        'm' => 60,
        'h' => 60 * 60,
        'd' => 24 * 60 * 60,
        _ => return None,
    };
    number.checked_mul(unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration() {
        for (input, expected) in [
            ("13s", Some(13)),
            ("42m", Some(42 * 60)),
            ("7h", Some(7 * 60 * 60)),
            ("20d", Some(20 * 24 * 60 * 60)),
            ("", Some(0)),
            ("1d 2h 3m 4s", Some(((24 + 2) * 60 + 3) * 60 + 4)),
            ("xyz", None),
            ("7dd", None),
            ("15", None),
            ("5µ", None),
        ] {
            let output = serde_json::from_value::<Duration>(serde_json::Value::String(
                input.into(),
            ))
            .ok()
            .map(|x| x.0.as_secs());
            assert_eq!(output, expected, "{input}");
        }
    }
}
