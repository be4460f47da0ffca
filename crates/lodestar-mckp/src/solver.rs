//! Dyer-Zemel median-of-slopes search for the multiple-choice knapsack problem.
//!
//! Each round pairs up the surviving options of every undecided group, takes
//! the median value/weight slope `alpha` over all pairs, and checks which side
//! of `alpha` the LP multiplier lies on by comparing the capacity against the
//! weight bracket of the `value - alpha * weight` maximizers. Half of the pairs
//! lose an element every round, so the search runs in expected linear time.
//! Once the bracket contains the capacity, the leftover capacity is spent on
//! tied heavier options, which rounds the LP optimum to an integral choice
//! within one exchange of it.

use crate::error::MckpError;

/// Base tolerance for intercept and weight comparisons.
///
/// Intercept comparisons scale it by the largest option value of the instance.
pub const EPSILON: f64 = 1e-6;

/// A single `(value, weight)` choice inside a group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct McOption {
    /// Quality contribution.
    pub value: f64,
    /// Capacity consumption.
    pub weight: f64,
}

impl McOption {
    fn intercept(&self, alpha: f64) -> f64 {
        self.value - alpha * self.weight
    }
}

/// Slope between a lighter and a strictly heavier, strictly more valuable option.
fn slope(light: &McOption, heavy: &McOption) -> f64 {
    (light.value - heavy.value) / (light.weight - heavy.weight)
}

/// Which end of each pair to discard once the LP multiplier is located.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Discard {
    /// Capacity is too small at `alpha`: drop heavy ends with slope <= alpha.
    Heavier,
    /// Capacity is too large at `alpha`: drop light ends with slope >= alpha.
    Lighter,
}

/// Per-group maximizer of `value - alpha * weight`.
#[derive(Clone, Copy, Debug)]
struct Tentative {
    pick: usize,
    min_weight: f64,
    max_weight: f64,
}

/// Multiple-choice knapsack instance, built and solved once per frame.
///
/// ```
/// use lodestar_mckp::MckpSolver;
///
/// let mut solver = MckpSolver::new(5.0, 2).unwrap();
/// solver.push_option(10.0, 5.0, 0).unwrap();
/// solver.push_option(4.0, 1.0, 0).unwrap();
/// solver.push_option(8.0, 4.0, 1).unwrap();
/// solver.push_option(1.0, 0.0, 1).unwrap();
/// assert_eq!(solver.solve(), &[1, 0]);
/// ```
#[derive(Clone, Debug)]
pub struct MckpSolver {
    capacity: f64,
    groups: Vec<Vec<McOption>>,
    /// Chosen option per group; the group's option count means "nothing chosen".
    chosen: Vec<usize>,
}

impl MckpSolver {
    /// Create an instance with `group_count` empty groups sharing `capacity`.
    pub fn new(capacity: f64, group_count: usize) -> Result<Self, MckpError> {
        if group_count == 0 {
            return Err(MckpError::NoGroups);
        }
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(MckpError::InvalidCapacity(capacity));
        }
        Ok(Self {
            capacity,
            groups: vec![Vec::new(); group_count],
            chosen: vec![0; group_count],
        })
    }

    /// Append an option to `group` and return its index within the group.
    ///
    /// Resets the group's choice to the "nothing chosen" sentinel until the
    /// next [`solve`](Self::solve).
    pub fn push_option(&mut self, value: f64, weight: f64, group: usize) -> Result<usize, MckpError> {
        let group_count = self.groups.len();
        let Some(options) = self.groups.get_mut(group) else {
            return Err(MckpError::GroupOutOfRange { group, group_count });
        };
        if !weight.is_finite() || weight < 0.0 {
            return Err(MckpError::InvalidWeight { group, weight });
        }
        if !value.is_finite() || value < 0.0 {
            return Err(MckpError::InvalidValue { group, value });
        }
        options.push(McOption { value, weight });
        self.chosen[group] = options.len();
        Ok(options.len() - 1)
    }

    /// The capacity ceiling shared by all groups.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of options pushed into `group` (0 for an unknown group).
    pub fn option_count(&self, group: usize) -> usize {
        self.groups.get(group).map_or(0, Vec::len)
    }

    /// Look up a pushed option.
    pub fn option(&self, group: usize, index: usize) -> Option<McOption> {
        self.groups.get(group)?.get(index).copied()
    }

    /// Chosen option index per group. Only meaningful after [`solve`](Self::solve).
    pub fn chosen(&self) -> &[usize] {
        &self.chosen
    }

    /// Summed weight of the currently chosen options.
    pub fn total_weight(&self) -> f64 {
        self.chosen_options().map(|o| o.weight).sum()
    }

    /// Summed value of the currently chosen options.
    pub fn total_value(&self) -> f64 {
        self.chosen_options().map(|o| o.value).sum()
    }

    fn chosen_options(&self) -> impl Iterator<Item = &McOption> {
        self.groups
            .iter()
            .zip(&self.chosen)
            .filter_map(|(options, &index)| options.get(index))
    }

    /// Pick one option per group and return the choice.
    ///
    /// The total chosen weight stays within capacity whenever the lightest
    /// options of all groups fit together. Otherwise every group still gets
    /// an assignment (its lightest undominated option).
    pub fn solve(&mut self) -> &[usize] {
        let groups = &self.groups;
        let chosen = &mut self.chosen;

        let max_value = groups
            .iter()
            .flatten()
            .fold(0.0_f64, |acc, o| acc.max(o.value));
        let tolerance = EPSILON * max_value;

        let mut candidates: Vec<Vec<usize>> =
            groups.iter().map(|options| (0..options.len()).collect()).collect();
        let mut fathomed: Vec<bool> = groups.iter().map(Vec::is_empty).collect();
        for (choice, options) in chosen.iter_mut().zip(groups) {
            *choice = options.len();
        }

        let mut remaining = self.capacity;
        let mut slopes = Vec::new();
        let mut tentative: Vec<Option<Tentative>> = vec![None; groups.len()];
        let mut rounds = 0usize;

        loop {
            rounds += 1;

            for (g, cands) in candidates.iter_mut().enumerate() {
                if fathomed[g] {
                    continue;
                }
                prune_dominated(&groups[g], cands);
                if let [only] = cands.as_slice() {
                    fathomed[g] = true;
                    chosen[g] = *only;
                    remaining -= groups[g][*only].weight;
                }
            }

            slopes.clear();
            for (g, cands) in candidates.iter().enumerate() {
                if fathomed[g] {
                    continue;
                }
                for pair in cands.chunks_exact(2) {
                    slopes.push(slope(&groups[g][pair[0]], &groups[g][pair[1]]));
                }
            }
            if slopes.is_empty() {
                break;
            }

            let mid = slopes.len() / 2;
            let (_, median, _) = slopes.select_nth_unstable_by(mid, f64::total_cmp);
            let alpha = *median;

            let mut min_sum = 0.0;
            let mut max_sum = 0.0;
            for (g, cands) in candidates.iter().enumerate() {
                tentative[g] = None;
                if fathomed[g] {
                    continue;
                }
                let t = maximize_intercept(&groups[g], cands, alpha, tolerance);
                chosen[g] = t.pick;
                min_sum += t.min_weight;
                max_sum += t.max_weight;
                tentative[g] = Some(t);
            }

            tracing::trace!(
                round = rounds,
                alpha,
                pairs = slopes.len(),
                remaining,
                min_sum,
                max_sum,
                "mckp round"
            );

            let discard = if remaining < min_sum - EPSILON {
                Discard::Heavier
            } else if remaining > max_sum + EPSILON {
                Discard::Lighter
            } else {
                spend_slack(
                    groups,
                    chosen,
                    &candidates,
                    &tentative,
                    self.capacity,
                    alpha,
                    tolerance,
                );
                break;
            };

            for (g, cands) in candidates.iter_mut().enumerate() {
                if !fathomed[g] {
                    discard_pairs(&groups[g], cands, alpha, discard);
                }
            }
        }

        tracing::trace!(rounds, groups = groups.len(), "mckp solved");
        &self.chosen
    }
}

/// Order each adjacent candidate pair lighter-first and drop the heavier
/// element when it is not strictly more valuable.
fn prune_dominated(options: &[McOption], cands: &mut Vec<usize>) {
    let mut j = 0;
    while j + 1 < cands.len() {
        let (a, b) = (&options[cands[j]], &options[cands[j + 1]]);
        if b.weight < a.weight || (b.weight == a.weight && b.value > a.value) {
            cands.swap(j, j + 1);
        }
        if options[cands[j]].value >= options[cands[j + 1]].value {
            cands.swap_remove(j + 1);
        } else {
            j += 2;
        }
    }
}

fn maximize_intercept(
    options: &[McOption],
    cands: &[usize],
    alpha: f64,
    tolerance: f64,
) -> Tentative {
    let mut best = f64::NEG_INFINITY;
    let mut t = Tentative {
        pick: cands[0],
        min_weight: f64::INFINITY,
        max_weight: f64::NEG_INFINITY,
    };
    for &i in cands {
        let option = &options[i];
        let intercept = option.intercept(alpha);
        if intercept > best + tolerance {
            best = intercept;
            t = Tentative {
                pick: i,
                min_weight: option.weight,
                max_weight: option.weight,
            };
        } else if intercept >= best - tolerance {
            if option.weight > t.max_weight {
                t.max_weight = option.weight;
            }
            if option.weight < t.min_weight {
                t.min_weight = option.weight;
                t.pick = i;
            }
        }
    }
    t
}

fn discard_pairs(options: &[McOption], cands: &mut Vec<usize>, alpha: f64, discard: Discard) {
    let mut kept = Vec::with_capacity(cands.len());
    let mut pairs = cands.chunks_exact(2);
    for pair in &mut pairs {
        let (light, heavy) = (pair[0], pair[1]);
        let s = slope(&options[light], &options[heavy]);
        match discard {
            Discard::Heavier if s <= alpha => kept.push(light),
            Discard::Lighter if s >= alpha => kept.push(heavy),
            _ => kept.extend_from_slice(pair),
        }
    }
    kept.extend_from_slice(pairs.remainder());
    *cands = kept;
}

/// Upgrade undecided groups to heavier options tied at `alpha` while the
/// leftover capacity allows it.
fn spend_slack(
    groups: &[Vec<McOption>],
    chosen: &mut [usize],
    candidates: &[Vec<usize>],
    tentative: &[Option<Tentative>],
    capacity: f64,
    alpha: f64,
    tolerance: f64,
) {
    let used: f64 = groups
        .iter()
        .zip(chosen.iter())
        .filter_map(|(options, &i)| options.get(i))
        .map(|o| o.weight)
        .sum();
    let mut slack = capacity - used;

    for (g, t) in tentative.iter().enumerate() {
        let Some(t) = t else { continue };
        if t.max_weight <= t.min_weight || slack <= 0.0 {
            continue;
        }
        let current = groups[g][t.pick];
        let level = current.intercept(alpha);

        let mut upgrade: Option<usize> = None;
        for &i in &candidates[g] {
            let option = &groups[g][i];
            let extra = option.weight - current.weight;
            if extra > 0.0
                && extra <= slack
                && (option.intercept(alpha) - level).abs() <= tolerance
                && upgrade.is_none_or(|u| option.weight > groups[g][u].weight)
            {
                upgrade = Some(i);
            }
        }

        if let Some(i) = upgrade {
            slack -= groups[g][i].weight - current.weight;
            chosen[g] = i;
        }
    }
}
