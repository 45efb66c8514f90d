//! Assignment of point regions (foci) to blob regions (nuclei).
//!
//! Distances are signed distances to the blob contour: positive inside,
//! negative outside. A pairing is admitted when the signed distance exceeds
//! the [`InsideMargin`].

use crate::draw::{draw_line, DrawStyle, Rgb, RgbImage};
use crate::error::{CenfindError, Result};
use crate::roi::{Centre, Contour, RegionOfInterest};
use serde::{Deserialize, Serialize};

/// How foci are distributed over nuclei.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentPolicy {
    /// Each focus goes to the single nucleus with the largest signed
    /// distance, if that distance exceeds the margin. Foci are exclusive.
    /// Empty focus or nucleus lists are rejected with `EmptyInput`.
    #[default]
    NearestWithinMargin,
    /// Each nucleus collects every focus whose signed distance exceeds the
    /// margin. A focus may be counted for several nuclei. Empty inputs give
    /// empty lists.
    AllWithinMargin,
}

/// Signed distance threshold, in pixels, for admitting a focus.
///
/// Positive values require the focus to lie at least that deep inside the
/// nucleus. Negative values tolerate foci up to that far outside the
/// boundary: `InsideMargin(-50.0)` admits anything closer than 50 px.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct InsideMargin(pub f64);

impl InsideMargin {
    /// Whether a signed distance passes the margin (strictly greater).
    pub fn admits(&self, signed_distance: f64) -> bool {
        signed_distance > self.0
    }
}

/// A nucleus and the foci assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// The nucleus, with `children` holding the same foci as `foci`.
    pub nucleus: Contour,
    pub foci: Vec<Centre>,
}

impl Assignment {
    fn new(nucleus: &Contour, foci: Vec<Centre>) -> Self {
        let mut nucleus = nucleus.clone();
        nucleus.children = foci.clone();
        Self { nucleus, foci }
    }

    /// A nucleus with nothing assigned to it.
    pub fn unassigned(nucleus: &Contour) -> Self {
        Self::new(nucleus, Vec::new())
    }

    /// Number of foci assigned to the nucleus.
    pub fn score(&self) -> usize {
        self.foci.len()
    }

    /// Draw the nucleus, its foci, and a line from each focus to the
    /// nucleus centre.
    pub fn draw_onto(&self, image: &mut RgbImage, nucleus_color: Rgb<u8>, focus_color: Rgb<u8>, style: &DrawStyle) {
        self.nucleus.draw_onto(image, nucleus_color, style);
        let centre = self.nucleus.centre();
        for focus in &self.foci {
            focus.draw_onto(image, focus_color, style);
            draw_line(image, focus.position, centre, focus_color, style.thickness);
        }
    }
}

/// Pair foci with nuclei under the given policy.
///
/// Returns one [`Assignment`] per nucleus, in input order, with foci in
/// input order.
///
/// # Example
///
/// ```
/// use cenfind::assignment::{assign, AssignmentPolicy, InsideMargin};
/// use cenfind::roi::{Centre, Contour};
/// use cenfind::types::Position;
///
/// let nucleus = Contour::new(
///     vec![Position::new(0, 0), Position::new(0, 20), Position::new(20, 20), Position::new(20, 0)],
///     0,
///     "Nucleus",
/// );
/// let foci = vec![
///     Centre::new(Position::new(10, 10), 0, "Centriole"),
///     Centre::new(Position::new(100, 100), 1, "Centriole"),
/// ];
/// let pairs = assign(&foci, &[nucleus], InsideMargin(-5.0), AssignmentPolicy::NearestWithinMargin).unwrap();
/// assert_eq!(pairs[0].score(), 1);
/// ```
pub fn assign(
    foci: &[Centre],
    nuclei: &[Contour],
    margin: InsideMargin,
    policy: AssignmentPolicy,
) -> Result<Vec<Assignment>> {
    match policy {
        AssignmentPolicy::NearestWithinMargin => assign_nearest(foci, nuclei, margin),
        AssignmentPolicy::AllWithinMargin => Ok(assign_all_within(foci, nuclei, margin)),
    }
}

fn assign_nearest(foci: &[Centre], nuclei: &[Contour], margin: InsideMargin) -> Result<Vec<Assignment>> {
    if foci.is_empty() {
        return Err(CenfindError::EmptyInput("empty foci list".to_string()));
    }
    if nuclei.is_empty() {
        return Err(CenfindError::EmptyInput("empty nuclei list".to_string()));
    }

    let mut buckets: Vec<Vec<Centre>> = vec![Vec::new(); nuclei.len()];
    for focus in foci {
        let mut best: Option<(usize, f64)> = None;
        for (idx, nucleus) in nuclei.iter().enumerate() {
            let distance = nucleus.signed_distance(focus.position);
            // Strict comparison keeps the first nucleus on ties.
            if best.map_or(true, |(_, d)| distance > d) {
                best = Some((idx, distance));
            }
        }

        if let Some((idx, distance)) = best {
            if margin.admits(distance) {
                buckets[idx].push(focus.clone());
            }
        }
    }

    Ok(nuclei
        .iter()
        .zip(buckets)
        .map(|(nucleus, assigned)| Assignment::new(nucleus, assigned))
        .collect())
}

fn assign_all_within(foci: &[Centre], nuclei: &[Contour], margin: InsideMargin) -> Vec<Assignment> {
    nuclei
        .iter()
        .map(|nucleus| {
            let assigned = foci
                .iter()
                .filter(|f| margin.admits(nucleus.signed_distance(f.position)))
                .cloned()
                .collect();
            Assignment::new(nucleus, assigned)
        })
        .collect()
}
