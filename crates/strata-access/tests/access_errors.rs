//! Integration test: every error path of the access layer is reported
//! precisely and never swallowed.

use strata_access::{
    copy_into, crop, Advance, BoundState, Clamp, Container, CursorState, Layout, Mirror, Periodic,
    Position, Read, Write,
};
use strata_core::{AccessError, IndexSpace, SpaceError};
use strata_store::{ChunkConfig, StorageError};

#[test]
fn construction_errors() {
    assert_eq!(
        Container::create(Layout::Flat, &[], &0u8).unwrap_err(),
        StorageError::Space(SpaceError::NoDimensions)
    );
    assert_eq!(
        Container::create(Layout::Chunked(ChunkConfig::new(0)), &[3], &0u8).unwrap_err(),
        StorageError::InvalidTileEdge { tile_edge: 0 }
    );
    assert!(matches!(
        Container::<u8, _>::from_native(&[3, 3], vec![0u8; 8]),
        Err(StorageError::BufferLength {
            expected: 9,
            actual: 8
        })
    ));
}

#[test]
fn exhausted_cursor_keeps_failing() {
    let mut c = Container::create(Layout::Chunked(ChunkConfig::new(2)), &[3], &1u8).unwrap();
    let mut cursor = c.cursor_mut();
    while cursor.has_next() {
        cursor.advance().unwrap();
    }
    assert_eq!(cursor.advance(), Err(AccessError::IterationExhausted));
    assert_eq!(cursor.state(), CursorState::Exhausted);
    assert_eq!(cursor.set(3), Err(AccessError::IterationExhausted));
}

#[test]
fn strategies_never_fail_to_move() {
    let c = Container::create(Layout::Flat, &[4, 4], &0u8).unwrap();
    let mut periodic = c.extended_access(Periodic);
    let mut mirror = c.extended_access(Mirror::edge_excluding());
    let mut clamp = c.extended_access(Clamp);
    for pos in [[-100i64, 3], [4, 4], [i64::MAX, i64::MIN]] {
        periodic.set_position(&pos).unwrap();
        mirror.set_position(&pos).unwrap();
        clamp.set_position(&pos).unwrap();
        assert_eq!(periodic.bound_state(), BoundState::Outside);
        assert_eq!(periodic.get(), Ok(&0));
        assert_eq!(mirror.get(), Ok(&0));
        assert_eq!(clamp.get(), Ok(&0));
    }
}

#[test]
fn operations_reject_mismatched_spaces() {
    let a = Container::create(Layout::Flat, &[4, 4], &0u8).unwrap();
    let mut b = Container::create(Layout::Native, &[4, 5], &0u8).unwrap();
    assert!(matches!(
        copy_into(&a, &mut b),
        Err(AccessError::IncompatibleLayout { .. })
    ));
    let wider = IndexSpace::with_offset(&[4, 4], &[-1, 0]).unwrap();
    assert!(matches!(
        crop(&a, &wider, Layout::Flat),
        Err(AccessError::IncompatibleLayout { .. })
    ));
    let other_arity = IndexSpace::new(&[4]).unwrap();
    assert!(crop(&a, &other_arity, Layout::Flat).is_err());
}
