//! Integration test: concrete morphology scenarios with known answers.

use strata_access::{crop, Container, Layout};
use strata_core::IndexSpace;
use strata_morph::{
    dilate, dilate_with, erode, erode_full, CenteredRectangleShape, MorphError, RectangleShape,
    ShapeError,
};
use strata_store::ChunkConfig;
use strata_test_utils::fixtures::{shuffled_words, single_hole_10x9, THREAD_COUNTS};
use strata_test_utils::{init_tracing, rng};

fn hole_image(layout: Layout) -> Container<u8> {
    let space = IndexSpace::new(&[10, 9]).unwrap();
    Container::from_canonical(layout, space, single_hole_10x9()).unwrap()
}

#[test]
fn erode_single_hole_10x9() {
    init_tracing();
    let shape = CenteredRectangleShape::new(&[3, 2], false);
    for layout in [Layout::Flat, Layout::Chunked(ChunkConfig::new(4)), Layout::Native] {
        for &threads in THREAD_COUNTS {
            let out = erode(&hole_image(layout.clone()), &shape, threads).unwrap();
            assert_eq!(out.layout(), layout);
            assert_eq!(out.space().sizes(), &[10, 9]);
            for y in 0..9i64 {
                for x in 0..10i64 {
                    let expected = if x <= 4 && (2..=6).contains(&y) { 0 } else { 255 };
                    assert_eq!(out.get(&[x, y]), Ok(&expected), "({x}, {y}) on {layout:?}");
                }
            }
            assert_eq!(out.iter().filter(|&&v| v == 0).count(), 25);
        }
    }
}

#[test]
fn full_erosion_of_the_single_hole() {
    let shape = CenteredRectangleShape::new(&[3, 2], false);
    let input = hole_image(Layout::Flat);
    let full = erode_full(&input, &shape, 4).unwrap();
    assert_eq!(full.space().sizes(), &[16, 13]);
    assert_eq!(full.space().min_corner(), &[-3, -2]);
    for y in -2..11i64 {
        for x in -3..13i64 {
            let expected = if (-2..=4).contains(&x) && (2..=6).contains(&y) { 0 } else { 255 };
            assert_eq!(full.get(&[x, y]), Ok(&expected), "({x}, {y})");
        }
    }
    assert_eq!(full.iter().filter(|&&v| v == 0).count(), 35);

    let standard = erode(&input, &shape, 1).unwrap();
    let cropped = crop(&full, input.space(), Layout::Flat).unwrap();
    assert_eq!(cropped.to_vec(), standard.to_vec());
}

#[test]
fn dilate_with_skipped_centre() {
    let mut input = Container::create(Layout::Flat, &[3, 9], &0u8).unwrap();
    input.set(&[1, 4], 255).unwrap();
    let shape = CenteredRectangleShape::new(&[5, 2], true);
    for &threads in THREAD_COUNTS {
        let out = dilate_with(&input, &shape, &0, threads).unwrap();
        for y in 0..9i64 {
            for x in 0..3i64 {
                let lit = (2..=6).contains(&y) && (x, y) != (1, 4);
                let expected = if lit { 255 } else { 0 };
                assert_eq!(out.get(&[x, y]), Ok(&expected), "({x}, {y})");
            }
        }
        assert_eq!(out.iter().filter(|&&v| v == 255).count(), 14);
    }
}

#[test]
fn strings_dilate_to_the_lexicographic_maximum() {
    let words = shuffled_words(&mut rng(5));
    let space = IndexSpace::new(&[6, 6]).unwrap();
    let input = Container::from_canonical(Layout::Flat, space, words.clone()).unwrap();
    let out = dilate_with(&input, &RectangleShape::new(1, false), &String::new(), 4).unwrap();

    for y in 0..6i64 {
        for x in 0..6i64 {
            let mut best = String::new();
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let (nx, ny) = (x + dx, y + dy);
                    if (0..6).contains(&nx) && (0..6).contains(&ny) {
                        let word = &words[(ny * 6 + nx) as usize];
                        if *word > best {
                            best = word.clone();
                        }
                    }
                }
            }
            assert_eq!(out.get(&[x, y]), Ok(&best), "({x}, {y})");
        }
    }
}

#[test]
fn zero_threads_fail() {
    let input = hole_image(Layout::Flat);
    let err = dilate(&input, &RectangleShape::new(1, false), 0).unwrap_err();
    assert_eq!(err, MorphError::InvalidThreads { threads: 0 });
}

#[test]
fn shape_arity_mismatch_fails() {
    let input = hole_image(Layout::Flat);
    let shape = CenteredRectangleShape::new(&[1, 1, 1], false);
    let err = erode(&input, &shape, 2).unwrap_err();
    assert_eq!(
        err,
        MorphError::Shape(ShapeError::DimensionMismatch {
            expected: 3,
            actual: 2
        })
    );
}

#[test]
fn offset_inputs_keep_their_coordinates() {
    let space = IndexSpace::with_offset(&[10, 9], &[100, -50]).unwrap();
    let input = Container::from_canonical(Layout::Flat, space, single_hole_10x9()).unwrap();
    let shape = CenteredRectangleShape::new(&[3, 2], false);
    let full = erode_full(&input, &shape, 3).unwrap();
    assert_eq!(full.space().min_corner(), &[97, -52]);
    // The hole sits at (101, -46); its footprint is the reflected shape.
    assert_eq!(full.get(&[98, -48]), Ok(&0));
    assert_eq!(full.get(&[104, -44]), Ok(&0));
    assert_eq!(full.get(&[105, -46]), Ok(&255));
}
