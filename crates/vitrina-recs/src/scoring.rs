//! # Signal Scoring
//!
//! Collects the signals found for one candidate product and folds them into
//! a confidence, a dominant signal, and the reason text shown to the cashier.
//!
//! ## Fold
//! ```text
//! frequency  ──► w_f × ratio     ┐
//! history    ──► w_h × affinity  │   sum, capped at 1.0  ──► confidence
//! upsell     ──► w_u             │
//! category   ──► w_c             ┘   largest term        ──► signal + reason
//! ```
//! Equal terms resolve in the order listed above.

use vitrina_core::RecommendationSignal;

use crate::config::ScoringWeights;

/// Best co-purchase evidence for a candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyHit {
    /// `co(A, B) / support(A)` for the strongest cart product A.
    pub ratio: f64,
    /// `co(A, B)` for that same A.
    pub together: u32,
}

/// Customer-history evidence for a candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryHit {
    /// Repeat-purchase strength, see [`CustomerHistory::affinity`](crate::history::CustomerHistory::affinity).
    pub affinity: f64,
    pub times: u32,
}

/// Signals gathered for one candidate product.
#[derive(Debug, Clone, Default)]
pub struct CandidateSignals {
    pub frequency: Option<FrequencyHit>,
    pub category: Option<String>,
    pub history: Option<HistoryHit>,
    pub upsell: Option<String>,
}

/// Outcome of folding a candidate's signals.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub confidence: f64,
    pub signal: RecommendationSignal,
    pub reason: String,
}

impl CandidateSignals {
    /// Keeps the strongest co-purchase ratio seen across cart products.
    pub fn observe_frequency(&mut self, ratio: f64, together: u32) {
        let hit = FrequencyHit { ratio, together };
        match self.frequency {
            Some(best)
                if best.ratio > ratio || (best.ratio == ratio && best.together >= together) => {}
            _ => self.frequency = Some(hit),
        }
    }

    /// Folds the signals; `None` when no signal fired at all.
    pub fn score(&self, weights: &ScoringWeights) -> Option<Score> {
        let mut terms: Vec<(RecommendationSignal, f64)> = Vec::with_capacity(4);

        if let Some(hit) = self.frequency {
            terms.push((
                RecommendationSignal::FrequentlyBoughtTogether,
                weights.frequency_weight * hit.ratio.clamp(0.0, 1.0),
            ));
        }
        if let Some(hit) = self.history {
            terms.push((
                RecommendationSignal::CustomerHistory,
                weights.history_weight * hit.affinity.clamp(0.0, 1.0),
            ));
        }
        if self.upsell.is_some() {
            terms.push((RecommendationSignal::Upsell, weights.upsell_weight));
        }
        if self.category.is_some() {
            terms.push((RecommendationSignal::CategoryAffinity, weights.category_weight));
        }

        let (mut signal, mut best) = *terms.first()?;
        for &(candidate, value) in &terms[1..] {
            if value > best {
                signal = candidate;
                best = value;
            }
        }

        let confidence = terms
            .iter()
            .map(|(_, value)| value.max(0.0))
            .sum::<f64>()
            .min(1.0);

        Some(Score {
            confidence,
            signal,
            reason: self.reason(signal),
        })
    }

    fn reason(&self, signal: RecommendationSignal) -> String {
        match signal {
            RecommendationSignal::FrequentlyBoughtTogether => {
                let together = self.frequency.map_or(0, |hit| hit.together);
                format!(
                    "Productos frecuentemente comprados juntos ({})",
                    times_label(together)
                )
            }
            RecommendationSignal::CustomerHistory => {
                let times = self.history.map_or(0, |hit| hit.times);
                format!(
                    "Basado en tu historial de compras ({})",
                    times_label(times)
                )
            }
            RecommendationSignal::Upsell => format!(
                "Alternativa premium en {}",
                self.upsell.as_deref().unwrap_or_default()
            ),
            RecommendationSignal::CategoryAffinity => format!(
                "Misma categoría: {}",
                self.category.as_deref().unwrap_or_default()
            ),
        }
    }
}

fn times_label(n: u32) -> String {
    if n == 1 {
        "1 vez".to_string()
    } else {
        format!("{} veces", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights() -> ScoringWeights {
        ScoringWeights::default()
    }

    #[test]
    fn test_no_signal_no_score() {
        let signals = CandidateSignals::default();
        assert_eq!(signals.score(&weights()), None);
    }

    #[test]
    fn test_frequency_only() {
        let mut signals = CandidateSignals::default();
        signals.observe_frequency(1.0, 5);

        let score = signals.score(&weights()).unwrap();
        assert!((score.confidence - 0.6).abs() < 1e-9);
        assert_eq!(score.signal, RecommendationSignal::FrequentlyBoughtTogether);
        assert_eq!(
            score.reason,
            "Productos frecuentemente comprados juntos (5 veces)"
        );
    }

    #[test]
    fn test_observe_frequency_keeps_strongest() {
        let mut signals = CandidateSignals::default();
        signals.observe_frequency(0.5, 2);
        signals.observe_frequency(0.25, 9);
        signals.observe_frequency(0.5, 4);
        assert_eq!(
            signals.frequency,
            Some(FrequencyHit {
                ratio: 0.5,
                together: 4
            })
        );
    }

    #[test]
    fn test_sum_is_capped() {
        let signals = CandidateSignals {
            frequency: Some(FrequencyHit {
                ratio: 1.0,
                together: 3,
            }),
            category: Some("Electronics".to_string()),
            history: Some(HistoryHit {
                affinity: 1.0,
                times: 2,
            }),
            upsell: Some("Electronics".to_string()),
        };
        let score = signals.score(&weights()).unwrap();
        assert_eq!(score.confidence, 1.0);
        assert_eq!(score.signal, RecommendationSignal::FrequentlyBoughtTogether);
    }

    #[test]
    fn test_category_beats_upsell_by_weight() {
        let signals = CandidateSignals {
            category: Some("Electronics".to_string()),
            upsell: Some("Electronics".to_string()),
            ..Default::default()
        };
        let score = signals.score(&weights()).unwrap();
        assert!((score.confidence - 0.5).abs() < 1e-9);
        assert_eq!(score.signal, RecommendationSignal::CategoryAffinity);
        assert_eq!(score.reason, "Misma categoría: Electronics");
    }

    #[test]
    fn test_ties_prefer_earlier_signal() {
        let w = ScoringWeights {
            upsell_weight: 0.3,
            category_weight: 0.3,
            ..ScoringWeights::default()
        };
        let signals = CandidateSignals {
            category: Some("Audio".to_string()),
            upsell: Some("Audio".to_string()),
            ..Default::default()
        };
        let score = signals.score(&w).unwrap();
        assert_eq!(score.signal, RecommendationSignal::Upsell);
        assert_eq!(score.reason, "Alternativa premium en Audio");
    }

    #[test]
    fn test_history_reason() {
        let signals = CandidateSignals {
            history: Some(HistoryHit {
                affinity: 1.0,
                times: 1,
            }),
            ..Default::default()
        };
        let score = signals.score(&weights()).unwrap();
        assert_eq!(score.reason, "Basado en tu historial de compras (1 vez)");
        assert!(score.reason.contains("historial"));
    }
}
