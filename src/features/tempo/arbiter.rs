//! Reliability arbitration across tempo candidates
//!
//! Scores each candidate by base confidence, peak support, and harmonic
//! agreement with the other methods, then reconciles the ranking:
//!
//! 1. Highest score wins
//! 2. Consensus override: when reliable methods cluster on a tempo and the
//!    winner sits far outside the cluster, the cluster mean wins instead
//! 3. Octave correction: fast-looking winners yield to a well-supported
//!    half-tempo candidate (and slow-looking winners to a double-tempo one)
//!
//! This stage never fails; an empty candidate list resolves to the 120 BPM
//! sentinel.

use super::TempoCandidate;

/// Musically common tempo ratios between methods (half, two-thirds, unison,
/// four-thirds, three-halves, double)
const HARMONIC_RATIOS: [f32; 6] = [0.5, 0.67, 1.0, 1.33, 1.5, 2.0];

/// Tolerance around a harmonic ratio
const HARMONIC_TOLERANCE: f32 = 0.05;

/// Score bonus per harmonically-related other method
const HARMONIC_BONUS: f32 = 0.3;

/// Peak-count boost: `min(peak_count / 80, 1.5)`. 80 is roughly the peak
/// yield of a 60 s window at ordinary tempos.
const PEAK_BOOST_DIVISOR: f32 = 80.0;
const PEAK_BOOST_CAP: f32 = 1.5;

/// Candidates with fewer peaks than this are not trusted
const MIN_RELIABLE_PEAKS: usize = 10;

/// Score multiplier for unreliable candidates
const LOW_PEAK_PENALTY: f32 = 0.3;

/// Consensus override: cluster width and minimum winner distance, in BPM
const CONSENSUS_BAND_BPM: f32 = 5.0;
const CONSENSUS_OVERRIDE_GAP_BPM: f32 = 10.0;

/// Octave correction gates and tolerances
const HIGH_TEMPO_GATE_BPM: f32 = 160.0;
const LOW_TEMPO_GATE_BPM: f32 = 80.0;
const OCTAVE_TOLERANCE_BPM: f32 = 10.0;
const OCTAVE_MIN_PEAKS: usize = 20;

/// Sentinel for an empty candidate list
const SENTINEL_BPM: f32 = 120.0;

/// A candidate with its derived score (the original confidence is untouched)
#[derive(Debug, Clone)]
struct ScoredCandidate {
    method: &'static str,
    bpm: f32,
    peak_count: usize,
    score: f32,
}

/// Reconcile the candidate list into a single BPM
pub fn choose_bpm(candidates: &[TempoCandidate]) -> f32 {
    if candidates.is_empty() {
        log::warn!("No tempo candidates to arbitrate, returning sentinel");
        return SENTINEL_BPM;
    }

    let mut scored = score_candidates(candidates);

    // Stable sort: equal scores keep method order
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    let winner = scored[0].clone();
    log::debug!(
        "Arbiter winner: {:.1} BPM from {} (score {:.2}, peaks {})",
        winner.bpm,
        winner.method,
        winner.score,
        winner.peak_count
    );

    // Consensus override: prefer agreement among reliable methods over a
    // single outlier winner
    let top = &scored[..scored.len().min(3)];
    let consensus: Vec<f32> = top
        .iter()
        .filter(|c| c.peak_count >= MIN_RELIABLE_PEAKS)
        .map(|c| c.bpm)
        .collect();

    if consensus.len() >= 2 {
        let mean = consensus.iter().sum::<f32>() / consensus.len() as f32;
        let agreeing = consensus
            .iter()
            .filter(|&&bpm| (bpm - mean).abs() < CONSENSUS_BAND_BPM)
            .count();

        if agreeing >= 2 && (winner.bpm - mean).abs() > CONSENSUS_OVERRIDE_GAP_BPM {
            log::debug!(
                "Consensus override: {} reliable methods agree on ~{:.0} BPM over {:.1}",
                agreeing,
                mean,
                winner.bpm
            );
            return mean.round();
        }
    }

    // Octave correction: halves of fast-looking detections (and doubles of
    // slow-looking ones) are often the true tempo
    if winner.bpm > HIGH_TEMPO_GATE_BPM {
        let half = winner.bpm / 2.0;
        if let Some(candidate) = scored.iter().find(|c| {
            (c.bpm - half).abs() < OCTAVE_TOLERANCE_BPM && c.peak_count >= OCTAVE_MIN_PEAKS
        }) {
            log::debug!(
                "Octave correction: {:.1} BPM is high, preferring half-tempo {:.1} ({} peaks)",
                winner.bpm,
                candidate.bpm,
                candidate.peak_count
            );
            return candidate.bpm;
        }
    }

    if winner.bpm < LOW_TEMPO_GATE_BPM {
        let double = winner.bpm * 2.0;
        if let Some(candidate) = scored.iter().find(|c| {
            (c.bpm - double).abs() < OCTAVE_TOLERANCE_BPM && c.peak_count >= OCTAVE_MIN_PEAKS
        }) {
            log::debug!(
                "Octave correction: {:.1} BPM is low, preferring double-tempo {:.1} ({} peaks)",
                winner.bpm,
                candidate.bpm,
                candidate.peak_count
            );
            return candidate.bpm;
        }
    }

    winner.bpm
}

/// Compute the derived score for every candidate
///
/// `score = confidence + min(peak_count/80, 1.5)`, plus 0.3 for each other
/// method whose BPM relates to this one at a musically common ratio. The
/// low-peak-count penalty multiplies last, after all boosts.
fn score_candidates(candidates: &[TempoCandidate]) -> Vec<ScoredCandidate> {
    candidates
        .iter()
        .enumerate()
        .map(|(idx, candidate)| {
            let peak_boost =
                (candidate.peak_count as f32 / PEAK_BOOST_DIVISOR).min(PEAK_BOOST_CAP);
            let mut score = candidate.confidence + peak_boost;

            for (other_idx, other) in candidates.iter().enumerate() {
                if other_idx == idx {
                    continue;
                }
                let ratio = other.bpm / candidate.bpm;
                if HARMONIC_RATIOS
                    .iter()
                    .any(|&factor| (ratio - factor).abs() < HARMONIC_TOLERANCE)
                {
                    score += HARMONIC_BONUS;
                }
            }

            if candidate.peak_count < MIN_RELIABLE_PEAKS {
                score *= LOW_PEAK_PENALTY;
            }

            ScoredCandidate {
                method: candidate.method,
                bpm: candidate.bpm,
                peak_count: candidate.peak_count,
                score,
            }
        })
        .collect()
}
