//! Edge case tests for degenerate geometry, empty inputs and frame borders.

use cenfind::assignment::{assign, AssignmentPolicy, InsideMargin};
use cenfind::draw::{DrawStyle, RgbImage, RED};
use cenfind::evaluator::evaluate_field;
use cenfind::export::{read_centrioles, write_centrioles};
use cenfind::metrics::frequency::frequency_table;
use cenfind::metrics::scoring::is_full_in_frame;
use cenfind::roi::{BBox, Centre, Contour, RegionOfInterest, Roi};
use cenfind::types::Position;
use cenfind::CenfindError;
use ndarray::Array2;

fn contour(coords: &[(i32, i32)]) -> Contour {
    Contour::new(
        coords.iter().map(|&(r, c)| Position::new(r, c)).collect(),
        0,
        "Nucleus",
    )
}

#[test]
fn test_single_pixel_contour() {
    let c = contour(&[(7, 9)]);
    assert_eq!(c.centre(), Position::new(7, 9));
    let bbox = c.bbox();
    assert_eq!(bbox.dims(), (1, 1));
    assert!(bbox.contains(c.centre()));
    assert_eq!(c.area(), 0.0);
}

#[test]
fn test_collinear_contour_centre_on_line() {
    // A run along the frame edge has no area.
    let c = contour(&[(0, 0), (0, 10), (0, 20)]);
    let centre = c.centre();
    assert_eq!(centre, Position::new(0, 10));
    assert!(c.bbox().contains(centre));
}

#[test]
fn test_concave_contour_centre_inside_bbox() {
    // U shape whose centroid falls in the notch.
    let c = contour(&[(0, 0), (0, 30), (30, 30), (30, 20), (5, 20), (5, 10), (30, 10), (30, 0)]);
    assert!(c.bbox().contains(c.centre()));
}

#[test]
fn test_empty_bbox() {
    let bbox = BBox::new(Position::new(4, 4), Position::new(4, 4), 0, "");
    assert_eq!(bbox.dims(), (0, 0));
    let plane = Array2::<f32>::zeros((8, 8));
    assert_eq!(bbox.extract(plane.view()).unwrap().dim(), (0, 0));
}

#[test]
fn test_centre_box_near_edge_needs_clipping() {
    let focus = Centre::new(Position::new(3, 3), 0, "Centriole");
    let plane = Array2::<u16>::zeros((100, 100));

    assert!(matches!(focus.extract(plane.view()), Err(CenfindError::OutOfBounds(_))));

    let clipped = focus.bbox().clip(plane.dim());
    assert_eq!(clipped.extract(plane.view()).unwrap().dim(), (35, 35));
}

#[test]
fn test_contour_extract_covers_every_vertex() {
    let c = contour(&[(2, 3), (2, 7), (6, 7), (6, 3)]);
    let plane = Array2::from_shape_fn((10, 10), |(r, c)| (r * 10 + c) as u32);
    let crop = c.extract(plane.view()).unwrap();
    assert_eq!(crop.dim(), (5, 5));
    assert_eq!(crop[[0, 0]], 23);
    assert_eq!(crop[[4, 4]], 67);
}

#[test]
fn test_drawing_outside_buffer_is_clipped() {
    let mut image = RgbImage::new(16, 16);
    let rois = vec![
        Roi::Centre(Centre::new(Position::new(-40, 200), 0, "Centriole")),
        Roi::Contour(contour(&[(-5, -5), (-5, 30), (30, 30)])),
        Roi::BBox(BBox::new(Position::new(2, 2), Position::new(100, 100), 0, "")),
    ];
    for roi in &rois {
        roi.draw_onto(&mut image, RED, &DrawStyle::default());
    }
    assert_eq!(image.dimensions(), (16, 16));
    assert_eq!(*image.get_pixel(2, 2), RED);
}

#[test]
fn test_focus_on_boundary_with_zero_margin() {
    let nuclei = vec![contour(&[(0, 0), (0, 20), (20, 20), (20, 0)])];
    let foci = vec![Centre::new(Position::new(0, 10), 0, "Centriole")];

    // Signed distance is exactly 0 and the comparison is strict.
    let pairs = assign(&foci, &nuclei, InsideMargin(0.0), AssignmentPolicy::NearestWithinMargin).unwrap();
    assert_eq!(pairs[0].score(), 0);

    let pairs = assign(&foci, &nuclei, InsideMargin(-0.5), AssignmentPolicy::NearestWithinMargin).unwrap();
    assert_eq!(pairs[0].score(), 1);
}

#[test]
fn test_far_focus_unassigned_under_default_margin() {
    let nuclei = vec![contour(&[(0, 0), (0, 20), (20, 20), (20, 0)])];
    let foci = vec![
        Centre::new(Position::new(10, 60), 0, "Centriole"),
        Centre::new(Position::new(10, 80), 1, "Centriole"),
    ];
    let pairs = assign(&foci, &nuclei, InsideMargin(-50.0), AssignmentPolicy::NearestWithinMargin).unwrap();
    assert_eq!(pairs[0].foci.len(), 1);
    assert_eq!(pairs[0].foci[0].index, 0);
}

#[test]
fn test_empty_frequency_table() {
    let table = frequency_table(&[]);
    assert!(table.is_empty());
    let df = table.to_dataframe().unwrap();
    assert_eq!(df.height(), 0);
    assert_eq!(df.width(), 8);
}

#[test]
fn test_frame_test_on_tiny_frames() {
    assert!(!is_full_in_frame(Position::new(0, 0), (0, 0), 0.05));
    assert!(is_full_in_frame(Position::new(1, 1), (3, 3), 0.05));
    assert!(!is_full_in_frame(Position::new(0, 1), (3, 3), 0.05));
}

#[test]
fn test_zero_tolerance_requires_exact_positions() {
    let annotation = [Position::new(10, 10)];
    let record = evaluate_field("ds", "f", 0, &annotation, &[Position::new(10, 11)], 0.0).unwrap();
    assert_eq!(record.f1, 0.0);
    let record = evaluate_field("ds", "f", 0, &annotation, &annotation, 0.0).unwrap();
    assert_eq!(record.f1, 1.0);
}

#[test]
fn test_duplicate_predictions_match_once() {
    let annotation = [Position::new(10, 10)];
    let predictions = [Position::new(10, 10), Position::new(10, 10)];
    let record = evaluate_field("ds", "f", 0, &annotation, &predictions, 3.0).unwrap();
    assert_eq!(record.precision, 0.5);
    assert_eq!(record.recall, 1.0);
    assert_eq!(record.f1, 0.667);
}

#[test]
fn test_empty_centriole_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    write_centrioles(&path, &[]).unwrap();
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    assert!(read_centrioles(&path).unwrap().is_empty());
}
