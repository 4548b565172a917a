//! Display flags (`isAI`, `hasVideo`) attached to every fetched record.
//!
//! The dashboard historically rolled these at random on each load. Payload
//! values win whenever the backend supplies them.

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use buzz_core::types::ArticleRecord;
use buzz_core::Article;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const AI_PROBABILITY: f64 = 0.3;
pub const VIDEO_PROBABILITY: f64 = 0.2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlagPolicy {
    /// Only trust the payload; missing flags are false.
    Payload,
    /// Ignore the payload and roll every flag.
    Random,
    /// Payload when present, otherwise roll.
    #[default]
    PayloadOrRandom,
}

impl FromStr for FlagPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "payload" => Ok(FlagPolicy::Payload),
            "random" => Ok(FlagPolicy::Random),
            "payload-or-random" => Ok(FlagPolicy::PayloadOrRandom),
            other => Err(format!(
                "Invalid flag policy: {} (expected payload, random or payload-or-random)",
                other
            )),
        }
    }
}

impl fmt::Display for FlagPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FlagPolicy::Payload => "payload",
            FlagPolicy::Random => "random",
            FlagPolicy::PayloadOrRandom => "payload-or-random",
        })
    }
}

pub struct FlagEnricher {
    policy: FlagPolicy,
    rng: Mutex<StdRng>,
}

impl FlagEnricher {
    pub fn new(policy: FlagPolicy) -> Self {
        Self {
            policy,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(policy: FlagPolicy, seed: u64) -> Self {
        Self {
            policy,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn policy(&self) -> FlagPolicy {
        self.policy
    }

    pub fn enrich(&self, record: ArticleRecord) -> Article {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let (is_ai, has_video) = match self.policy {
            FlagPolicy::Payload => (
                record.is_ai.unwrap_or(false),
                record.has_video.unwrap_or(false),
            ),
            FlagPolicy::Random => (
                rng.gen_bool(AI_PROBABILITY),
                rng.gen_bool(VIDEO_PROBABILITY),
            ),
            FlagPolicy::PayloadOrRandom => (
                record.is_ai.unwrap_or_else(|| rng.gen_bool(AI_PROBABILITY)),
                record.has_video.unwrap_or_else(|| rng.gen_bool(VIDEO_PROBABILITY)),
            ),
        };
        drop(rng);
        record.into_article(is_ai, has_video)
    }

    pub fn enrich_all(&self, records: Vec<ArticleRecord>) -> Vec<Article> {
        records.into_iter().map(|record| self.enrich(record)).collect()
    }
}

impl Default for FlagEnricher {
    fn default() -> Self {
        Self::new(FlagPolicy::default())
    }
}

impl fmt::Debug for FlagEnricher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagEnricher").field("policy", &self.policy).finish()
    }
}
