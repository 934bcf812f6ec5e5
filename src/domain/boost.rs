//! Closed configuration types for the boost product lines.
//!
//! Each product line (ranked, level, wins) has its own config struct that is
//! validated at the API boundary and passed by value into the pricing engine.

use serde::{Deserialize, Serialize};

/// Competitive rank tiers, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Elite,
    Champion,
    Unreal,
}

impl Rank {
    /// Per-rank difficulty coefficient used by the ladder.
    pub fn base_weight(&self) -> f64 {
        match self {
            Rank::Bronze => 1.0,
            Rank::Silver => 1.1,
            Rank::Gold => 1.2,
            Rank::Platinum => 1.35,
            Rank::Diamond => 1.55,
            Rank::Elite => 2.0,
            Rank::Champion => 2.3,
            Rank::Unreal => 2.8,
        }
    }

    /// Bronze through diamond split into three divisions; the top tiers do not.
    pub fn has_divisions(&self) -> bool {
        matches!(
            self,
            Rank::Bronze | Rank::Silver | Rank::Gold | Rank::Platinum | Rank::Diamond
        )
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Rank::Bronze => "Bronze",
            Rank::Silver => "Silver",
            Rank::Gold => "Gold",
            Rank::Platinum => "Platinum",
            Rank::Diamond => "Diamond",
            Rank::Elite => "Elite",
            Rank::Champion => "Champion",
            Rank::Unreal => "Unreal",
        }
    }
}

/// Division within a ranked tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Division {
    I,
    II,
    III,
}

impl std::fmt::Display for Division {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Division::I => write!(f, "I"),
            Division::II => write!(f, "II"),
            Division::III => write!(f, "III"),
        }
    }
}

/// Server region the boost is played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Region {
    #[default]
    #[serde(rename = "europe")]
    Europe,
    #[serde(rename = "na-east")]
    NaEast,
    #[serde(rename = "na-west")]
    NaWest,
    #[serde(rename = "asia")]
    Asia,
    #[serde(rename = "oce")]
    Oce,
    #[serde(rename = "br")]
    Br,
}

impl Region {
    pub fn multiplier(&self) -> f64 {
        match self {
            Region::Europe => 1.0,
            Region::NaEast => 1.05,
            Region::NaWest => 1.05,
            Region::Asia => 1.07,
            Region::Oce => 1.08,
            Region::Br => 1.06,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameMode {
    #[default]
    #[serde(rename = "battle-royale")]
    BattleRoyale,
    #[serde(rename = "zero-build")]
    ZeroBuild,
}

impl GameMode {
    pub fn multiplier(&self) -> f64 {
        match self {
            GameMode::BattleRoyale => 1.0,
            GameMode::ZeroBuild => 1.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Pc,
    Xbox,
    Playstation,
    Switch,
}

impl Platform {
    pub fn multiplier(&self) -> f64 {
        match self {
            Platform::Pc => 1.0,
            Platform::Xbox | Platform::Playstation => 1.08,
            Platform::Switch => 1.1,
        }
    }
}

/// Optional add-ons for a ranked boost. `play_offline` carries no surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RankedOptions {
    pub play_offline: bool,
    pub streaming: bool,
    pub express_delivery: bool,
    pub coaching_duo: bool,
}

/// Configuration for a ranked boost order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedConfig {
    pub current_rank: Rank,
    #[serde(default)]
    pub current_div: Option<Division>,
    pub desired_rank: Rank,
    #[serde(default)]
    pub desired_div: Option<Division>,
    #[serde(default)]
    pub region: Region,
    #[serde(default)]
    pub mode: GameMode,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub options: RankedOptions,
}

impl RankedConfig {
    /// Human-readable range summary, e.g. "Gold II -> Elite".
    pub fn summary(&self) -> String {
        format!(
            "{} -> {}",
            format_rank(self.current_rank, self.current_div),
            format_rank(self.desired_rank, self.desired_div)
        )
    }
}

pub(crate) fn format_rank(rank: Rank, div: Option<Division>) -> String {
    if rank.has_divisions() {
        format!("{} {}", rank.display_name(), div.unwrap_or(Division::I))
    } else {
        rank.display_name().to_string()
    }
}

/// Configuration for a level boost order. Levels are clamped to [1, 200].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    pub current_level: i64,
    pub desired_level: i64,
    #[serde(default)]
    pub platform: Platform,
}

/// Win category; determines the per-win base rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WinType {
    #[default]
    Regular,
    Pub,
    Blitz,
}

impl WinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WinType::Regular => "regular",
            WinType::Pub => "pub",
            WinType::Blitz => "blitz",
        }
    }
}

/// Add-ons for a win boost; each adds $1 per win, independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WinOptions {
    pub duo: bool,
    pub self_play: bool,
}

/// Configuration for a win boost order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinBoostConfig {
    pub current_wins: i64,
    pub desired_wins: i64,
    #[serde(default)]
    pub win_type: WinType,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub options: WinOptions,
}

impl WinBoostConfig {
    /// Requested win count, floored at zero.
    pub fn wins_requested(&self) -> i64 {
        let current = self.current_wins.clamp(0, 9999);
        let desired = self.desired_wins.clamp(0, 9999);
        (desired - current).max(0)
    }
}
