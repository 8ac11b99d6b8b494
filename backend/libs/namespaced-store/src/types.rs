//! Option and result types shared by the command families

use redis::Cmd;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Remaining time to live reported by TTL / PTTL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Key does not exist (-2)
    Missing,
    /// Key exists without an expiry (-1)
    Persistent,
    Expires(Duration),
}

impl Ttl {
    pub fn from_seconds(raw: i64) -> Self {
        match raw {
            -2 => Ttl::Missing,
            raw if raw < 0 => Ttl::Persistent,
            secs => Ttl::Expires(Duration::from_secs(secs as u64)),
        }
    }

    pub fn from_millis(raw: i64) -> Self {
        match raw {
            -2 => Ttl::Missing,
            raw if raw < 0 => Ttl::Persistent,
            millis => Ttl::Expires(Duration::from_millis(millis as u64)),
        }
    }

    pub fn remaining(&self) -> Option<Duration> {
        match self {
            Ttl::Expires(d) => Some(*d),
            _ => None,
        }
    }
}

/// Value type reported by TYPE
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyType {
    None,
    String,
    List,
    Set,
    ZSet,
    Hash,
    Stream,
    Other(String),
}

impl From<&str> for KeyType {
    fn from(s: &str) -> Self {
        match s {
            "none" => KeyType::None,
            "string" => KeyType::String,
            "list" => KeyType::List,
            "set" => KeyType::Set,
            "zset" => KeyType::ZSet,
            "hash" => KeyType::Hash,
            "stream" => KeyType::Stream,
            other => KeyType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::None => write!(f, "none"),
            KeyType::String => write!(f, "string"),
            KeyType::List => write!(f, "list"),
            KeyType::Set => write!(f, "set"),
            KeyType::ZSet => write!(f, "zset"),
            KeyType::Hash => write!(f, "hash"),
            KeyType::Stream => write!(f, "stream"),
            KeyType::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Sorted-set member with its score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMember {
    pub member: String,
    pub score: f64,
}

impl From<(String, f64)> for ScoredMember {
    fn from((member, score): (String, f64)) -> Self {
        Self { member, score }
    }
}

/// LINSERT pivot side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Before,
    After,
}

impl InsertPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsertPosition::Before => "BEFORE",
            InsertPosition::After => "AFTER",
        }
    }
}

/// Score or lex interval for the *BYSCORE / *BYLEX range commands.
///
/// Bounds use Redis syntax: `-inf`, `+inf`, `(5` (exclusive) for scores and
/// `-`, `+`, `[a`, `(a` for lex ranges. A LIMIT clause is sent when either
/// `offset` or `count` is non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeBy {
    pub min: String,
    pub max: String,
    pub offset: i64,
    pub count: i64,
}

impl RangeBy {
    pub fn new(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
            offset: 0,
            count: 0,
        }
    }

    /// Every score
    pub fn all_scores() -> Self {
        Self::new("-inf", "+inf")
    }

    /// Every member in lex order
    pub fn all_lex() -> Self {
        Self::new("-", "+")
    }

    pub fn limit(mut self, offset: i64, count: i64) -> Self {
        self.offset = offset;
        self.count = count;
        self
    }

    /// Append `min max` (or `max min` for the REV commands) and the LIMIT clause
    pub(crate) fn append_to(&self, cmd: &mut Cmd, reverse: bool, with_scores: bool) {
        if reverse {
            cmd.arg(&self.max).arg(&self.min);
        } else {
            cmd.arg(&self.min).arg(&self.max);
        }
        if with_scores {
            cmd.arg("WITHSCORES");
        }
        if self.offset != 0 || self.count != 0 {
            cmd.arg("LIMIT").arg(self.offset).arg(self.count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_from_raw() {
        assert_eq!(Ttl::from_seconds(-2), Ttl::Missing);
        assert_eq!(Ttl::from_seconds(-1), Ttl::Persistent);
        assert_eq!(
            Ttl::from_seconds(30),
            Ttl::Expires(Duration::from_secs(30))
        );
        assert_eq!(
            Ttl::from_millis(1500).remaining(),
            Some(Duration::from_millis(1500))
        );
        assert_eq!(Ttl::from_millis(-2).remaining(), None);
    }

    #[test]
    fn test_key_type_parse_and_display() {
        assert_eq!(KeyType::from("zset"), KeyType::ZSet);
        assert_eq!(KeyType::from("none"), KeyType::None);
        assert_eq!(
            KeyType::from("ReJSON-RL"),
            KeyType::Other("ReJSON-RL".into())
        );
        assert_eq!(KeyType::Hash.to_string(), "hash");
    }

    #[test]
    fn test_scored_member_from_tuple() {
        let m = ScoredMember::from(("alice".to_string(), 2.5));
        assert_eq!(m.member, "alice");
        assert_eq!(m.score, 2.5);
    }

    #[test]
    fn test_range_by_forward_without_limit() {
        let mut cmd = redis::cmd("ZRANGEBYSCORE");
        cmd.arg("k");
        RangeBy::new("1", "(5").append_to(&mut cmd, false, false);

        let mut expected = redis::cmd("ZRANGEBYSCORE");
        expected.arg("k").arg("1").arg("(5");
        assert_eq!(cmd.get_packed_command(), expected.get_packed_command());
    }

    #[test]
    fn test_range_by_reverse_with_scores_and_limit() {
        let mut cmd = redis::cmd("ZREVRANGEBYSCORE");
        cmd.arg("k");
        RangeBy::all_scores()
            .limit(0, 10)
            .append_to(&mut cmd, true, true);

        let mut expected = redis::cmd("ZREVRANGEBYSCORE");
        expected
            .arg("k")
            .arg("+inf")
            .arg("-inf")
            .arg("WITHSCORES")
            .arg("LIMIT")
            .arg(0)
            .arg(10);
        assert_eq!(cmd.get_packed_command(), expected.get_packed_command());
    }
}
