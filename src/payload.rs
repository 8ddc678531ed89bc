//! The statistics payload produced by the analysis backend.
//!
//! Every section and field is required. Decoding goes through
//! [`StatisticsPayload::from_json`], which either yields a fully populated
//! record or a [`PayloadError`]; nothing downstream deals with partial data.

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsPayload {
    pub status: String,
    pub message: String,
    pub hook: Hook,
    pub year_in_numbers: YearInNumbers,
    pub journey: Journey,
    pub peak_performance: PeakPerformance,
    pub timing: Timing,
    pub persona: PersonaSection,
    pub warmup: Warmup,
    pub quirks: Quirks,
    pub accuracy: Accuracy,
    pub comparisons: Comparisons,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hook {
    pub total_words: u64,
    pub total_time_minutes: f64,
    pub total_time_hours: f64,
    pub novel_comparison: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearInNumbers {
    pub total_tests: u64,
    pub active_days: u32,
    pub total_characters: u64,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub first_month_avg: f64,
    pub last_month_avg: f64,
    pub improvement: f64,
    pub best_month: String,
    pub best_month_wpm: f64,
    pub biggest_jump_month: String,
    pub biggest_jump_amount: f64,
    pub monthly_trend: Vec<MonthlyTrend>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    pub month: String,
    pub avg_wpm: f64,
    pub test_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakPerformance {
    pub all_time_pb: f64,
    pub pb_date: String,
    pub total_pbs_hit: u32,
    pub perfect_accuracy_count: u32,
    pub perfect_accuracy_pct: f64,
    pub thresholds: Vec<Threshold>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Threshold {
    pub wpm: u32,
    pub count: u32,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    pub best_hour: u8,
    pub best_hour_formatted: String,
    pub best_hour_wpm: f64,
    pub worst_hour: u8,
    pub worst_hour_formatted: String,
    pub worst_hour_wpm: f64,
    pub most_active_hour: u8,
    pub most_active_hour_formatted: String,
    pub most_active_hour_count: u32,
    pub best_day: String,
    pub best_day_wpm: f64,
    pub most_active_day: String,
    pub most_active_day_count: u32,
    pub time_preference: String,
    pub time_description: String,
    pub hourly_breakdown: Vec<HourlyStat>,
    pub daily_breakdown: Vec<DailyStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyStat {
    pub hour: u8,
    pub avg_wpm: f64,
    pub test_count: u32,
    pub avg_accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    pub day: String,
    pub avg_wpm: f64,
    pub test_count: u32,
    pub avg_accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaSection {
    pub dominant_persona: DominantPersona,
    pub all_personas: Vec<Persona>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDominantPersona", into = "RawDominantPersona")]
pub struct DominantPersona {
    pub kind: PersonaKind,
    pub name: String,
    pub description: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct RawDominantPersona {
    name: String,
    description: String,
    percentage: f64,
}

impl From<RawDominantPersona> for DominantPersona {
    fn from(raw: RawDominantPersona) -> Self {
        Self {
            kind: PersonaKind::from_name(&raw.name),
            name: raw.name,
            description: raw.description,
            percentage: raw.percentage,
        }
    }
}

impl From<DominantPersona> for RawDominantPersona {
    fn from(p: DominantPersona) -> Self {
        Self {
            name: p.name,
            description: p.description,
            percentage: p.percentage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPersona", into = "RawPersona")]
pub struct Persona {
    pub kind: PersonaKind,
    pub id: u32,
    pub count: u32,
    pub percentage: f64,
    pub avg_wpm: f64,
    pub avg_accuracy: f64,
    pub avg_consistency: f64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPersona {
    id: u32,
    count: u32,
    percentage: f64,
    avg_wpm: f64,
    avg_accuracy: f64,
    avg_consistency: f64,
    name: String,
    description: String,
}

impl From<RawPersona> for Persona {
    fn from(raw: RawPersona) -> Self {
        Self {
            kind: PersonaKind::from_name(&raw.name),
            id: raw.id,
            count: raw.count,
            percentage: raw.percentage,
            avg_wpm: raw.avg_wpm,
            avg_accuracy: raw.avg_accuracy,
            avg_consistency: raw.avg_consistency,
            name: raw.name,
            description: raw.description,
        }
    }
}

impl From<Persona> for RawPersona {
    fn from(p: Persona) -> Self {
        Self {
            id: p.id,
            count: p.count,
            percentage: p.percentage,
            avg_wpm: p.avg_wpm,
            avg_accuracy: p.avg_accuracy,
            avg_consistency: p.avg_consistency,
            name: p.name,
            description: p.description,
        }
    }
}

/// Persona classification, resolved once from the backend's persona name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum PersonaKind {
    #[strum(serialize = "Flow State")]
    FlowState,
    #[strum(serialize = "Speed Demon")]
    SpeedDemon,
    #[strum(serialize = "Steady Eddie")]
    SteadyEddie,
    #[strum(serialize = "Warm Up Mode")]
    WarmUpMode,
    #[strum(serialize = "Balanced Performer")]
    BalancedPerformer,
    #[strum(serialize = "Unrecognized")]
    Unrecognized,
}

impl PersonaKind {
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "Flow State" => PersonaKind::FlowState,
            "Speed Demon" => PersonaKind::SpeedDemon,
            "Steady Eddie" => PersonaKind::SteadyEddie,
            "Warm Up Mode" => PersonaKind::WarmUpMode,
            "Balanced Performer" => PersonaKind::BalancedPerformer,
            _ => PersonaKind::Unrecognized,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PersonaKind::FlowState => "🧠",
            PersonaKind::SpeedDemon => "⚡",
            PersonaKind::SteadyEddie => "📈",
            PersonaKind::WarmUpMode => "☁",
            PersonaKind::BalancedPerformer => "✨",
            PersonaKind::Unrecognized => "◆",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warmup {
    pub cold_start_wpm: f64,
    pub warmed_up_wpm: f64,
    pub warmup_improvement: f64,
    pub warmup_improvement_percent: f64,
    pub tests_until_peak: f64,
    pub median_tests_until_peak: f64,
    pub total_sessions: u32,
    pub avg_tests_per_session: f64,
    pub longest_session: u32,
    pub warmup_quality: String,
    pub warmup_message: String,
    pub warmup_curve: Vec<WarmupPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarmupPoint {
    pub test_number: u32,
    pub avg_wpm: f64,
    pub sample_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quirks {
    pub avg_restarts: f64,
    pub max_restarts: u32,
    pub first_try_pct: f64,
    pub time_wasted_minutes: f64,
    pub favorite_mode: String,
    pub favorite_mode_count: u32,
    pub restart_addiction_level: RestartAddiction,
}

/// Restart-habit rating, resolved from the backend's level label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(from = "String", into = "String")]
pub enum RestartAddiction {
    Low,
    Moderate,
    High,
    Extreme,
    Unrated,
}

impl From<String> for RestartAddiction {
    fn from(level: String) -> Self {
        match level.trim().to_ascii_lowercase().as_str() {
            "low" => RestartAddiction::Low,
            "moderate" | "medium" => RestartAddiction::Moderate,
            "high" => RestartAddiction::High,
            "extreme" => RestartAddiction::Extreme,
            _ => RestartAddiction::Unrated,
        }
    }
}

impl From<RestartAddiction> for String {
    fn from(level: RestartAddiction) -> Self {
        level.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accuracy {
    pub overall_accuracy: f64,
    pub total_errors: u64,
    pub error_breakdown: ErrorBreakdown,
    pub clutch_factor: ClutchFactor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBreakdown {
    pub wrong_key: ErrorShare,
    pub extra_chars: ErrorShare,
    pub missed_chars: ErrorShare,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorShare {
    pub count: u64,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClutchFactor {
    pub fast_tests_accuracy: f64,
    pub slow_tests_accuracy: f64,
    pub difference: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparisons {
    pub avg_wpm: f64,
    pub max_wpm: f64,
    pub avg_accuracy: f64,
    pub chars_per_second: f64,
    pub global_percentile: f64,
    pub skill_tier: String,
    pub tier_description: String,
    pub times_faster_than_avg: f64,
    pub percent_of_world_record: f64,
    pub comparison_message: String,
    pub featured_novel: FeaturedNovel,
    pub all_novel_comparisons: Vec<NovelComparison>,
    pub total_chars_typed: u64,
    pub featured_fact: String,
    pub consistency_score: f64,
    pub consistency_rating: String,
    pub wpm_std_dev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedNovel {
    pub title: String,
    pub word_count: u64,
    pub time_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelComparison {
    pub title: String,
    pub word_count: u64,
    pub time_minutes: f64,
    pub time_hours: f64,
}

const SUCCESS_STATUS: &str = "success";

impl StatisticsPayload {
    /// Decode and validate a backend response body.
    pub fn from_json(bytes: &[u8]) -> Result<Self, PayloadError> {
        let payload: StatisticsPayload = serde_json::from_slice(bytes)?;
        payload.validate()?;
        Ok(payload)
    }

    /// Range checks the backend contract promises but the wire format cannot
    /// express. Breakdown sums are not checked.
    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.status != SUCCESS_STATUS {
            return Err(PayloadError::Status {
                status: self.status.clone(),
                message: self.message.clone(),
            });
        }

        let percentages = [
            ("journey.improvement", self.journey.improvement, false),
            (
                "peakPerformance.perfectAccuracyPct",
                self.peak_performance.perfect_accuracy_pct,
                true,
            ),
            (
                "persona.dominantPersona.percentage",
                self.persona.dominant_persona.percentage,
                true,
            ),
            ("quirks.firstTryPct", self.quirks.first_try_pct, true),
            (
                "accuracy.overallAccuracy",
                self.accuracy.overall_accuracy,
                true,
            ),
            (
                "accuracy.errorBreakdown.wrongKey.pct",
                self.accuracy.error_breakdown.wrong_key.pct,
                true,
            ),
            (
                "accuracy.errorBreakdown.extraChars.pct",
                self.accuracy.error_breakdown.extra_chars.pct,
                true,
            ),
            (
                "accuracy.errorBreakdown.missedChars.pct",
                self.accuracy.error_breakdown.missed_chars.pct,
                true,
            ),
            (
                "accuracy.clutchFactor.fastTestsAccuracy",
                self.accuracy.clutch_factor.fast_tests_accuracy,
                true,
            ),
            (
                "accuracy.clutchFactor.slowTestsAccuracy",
                self.accuracy.clutch_factor.slow_tests_accuracy,
                true,
            ),
            (
                "comparisons.globalPercentile",
                self.comparisons.global_percentile,
                true,
            ),
        ];
        for (field, value, bounded) in percentages {
            check_value(field, value, bounded)?;
        }

        for persona in &self.persona.all_personas {
            check_value("persona.allPersonas.percentage", persona.percentage, true)?;
        }
        for threshold in &self.peak_performance.thresholds {
            check_value("peakPerformance.thresholds.pct", threshold.pct, true)?;
        }
        for month in &self.journey.monthly_trend {
            check_value("journey.monthlyTrend.avgWpm", month.avg_wpm, false)?;
        }
        check_value("warmup.testsUntilPeak", self.warmup.tests_until_peak, false)?;
        for point in &self.warmup.warmup_curve {
            check_value("warmup.warmupCurve.avgWpm", point.avg_wpm, false)?;
        }

        for (field, hour) in [
            ("timing.bestHour", self.timing.best_hour),
            ("timing.worstHour", self.timing.worst_hour),
            ("timing.mostActiveHour", self.timing.most_active_hour),
        ] {
            check_hour(field, hour)?;
        }
        for stat in &self.timing.hourly_breakdown {
            check_hour("timing.hourlyBreakdown.hour", stat.hour)?;
            check_value("timing.hourlyBreakdown.avgWpm", stat.avg_wpm, false)?;
        }

        Ok(())
    }

    /// "Top N%" figure used on the summary and share card.
    pub fn top_percent(&self) -> f64 {
        (100.0 - self.comparisons.global_percentile).max(0.0)
    }
}

fn check_value(field: &'static str, value: f64, percentage: bool) -> Result<(), PayloadError> {
    let in_range = value.is_finite() && (!percentage || (0.0..=100.0).contains(&value));
    if in_range {
        Ok(())
    } else {
        Err(PayloadError::OutOfRange { field, value })
    }
}

fn check_hour(field: &'static str, hour: u8) -> Result<(), PayloadError> {
    if hour < 24 {
        Ok(())
    } else {
        Err(PayloadError::OutOfRange {
            field,
            value: hour as f64,
        })
    }
}
