//! Erosion, dilation, opening and closing.
//!
//! Every operation fills a fresh output container (same layout kind as the
//! input) slab by slab: the output is split along its slowest axis and each
//! slab is handed to one scoped worker, which walks it with a localizing
//! cursor and probes the input through an extended random accessor. Workers
//! only share the input, the offset list and the boundary strategy, all by
//! shared reference.
//!
//! Erosion takes the minimum over the neighbourhood, dilation the maximum.
//! Neighbours outside the input read the operation's identity element
//! (`highest` for erosion, `lowest` for dilation, or the caller's value in
//! the `_with` variants) unless a strategy is supplied explicitly. With
//! that default, the standard result is exactly the full result cropped to
//! the input's space.
//!
//! Comparisons use `PartialOrd`; an incomparable neighbour (e.g. a NaN)
//! never replaces the running extremum.

use smallvec::SmallVec;
use strata_access::{
    for_each_slab, Advance, Constant, Container, ExtensionStrategy, Localize, LocalizingCursor,
    Position, Read, Slab, Write,
};
use strata_core::{AccessError, Coord, Extremum, IndexSpace, Sample};
use strata_store::Storage;

use crate::config::MorphConfig;
use crate::error::MorphError;
use crate::shape::Shape;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Erode,
    Dilate,
}

impl Op {
    #[inline]
    fn improves<T: PartialOrd>(self, candidate: &T, current: &T) -> bool {
        match self {
            Self::Erode => candidate < current,
            Self::Dilate => candidate > current,
        }
    }
}

/// Grayscale erosion over the input's own extent.
///
/// `output(p) = min { input(p + o) : o in shape }`, with neighbours outside
/// the input reading `T::highest()`.
///
/// # Examples
///
/// ```
/// use strata_access::{Container, Layout};
/// use strata_morph::{erode, RectangleShape};
///
/// let mut img = Container::create(Layout::Flat, &[5, 5], &0u8).unwrap();
/// img.fill(&255);
/// img.set(&[2, 2], 0).unwrap();
///
/// let out = erode(&img, &RectangleShape::new(1, false), 2).unwrap();
/// assert_eq!(out.iter().filter(|&&v| v == 0).count(), 9);
/// ```
#[tracing::instrument(skip_all, fields(space = %input.space(), threads = threads))]
pub fn erode<T, S, Sh>(
    input: &Container<T, S>,
    shape: &Sh,
    threads: usize,
) -> Result<Container<T>, MorphError>
where
    T: Extremum,
    S: Storage<T>,
    Sh: Shape + ?Sized,
{
    erode_with(input, shape, &T::highest(), threads)
}

/// Erosion with a caller-supplied identity, for samples without
/// representable extremes.
///
/// `identity` is both the seed of the running minimum and the value read
/// for neighbours outside the input.
#[tracing::instrument(skip_all, fields(space = %input.space(), threads = threads))]
pub fn erode_with<T, S, Sh>(
    input: &Container<T, S>,
    shape: &Sh,
    identity: &T,
    threads: usize,
) -> Result<Container<T>, MorphError>
where
    T: Sample + PartialOrd,
    S: Storage<T>,
    Sh: Shape + ?Sized,
{
    let boundary = Constant(identity.clone());
    morph(
        input,
        input.space().clone(),
        shape,
        identity,
        &boundary,
        &MorphConfig::with_threads(threads),
        Op::Erode,
    )
}

/// Erosion over the input grown by the shape radius on every axis.
///
/// The output's minimum corner is `input.min - radius`, so every output
/// cell any neighbourhood touches the input from is present and input
/// coordinates keep their meaning.
#[tracing::instrument(skip_all, fields(space = %input.space(), threads = threads))]
pub fn erode_full<T, S, Sh>(
    input: &Container<T, S>,
    shape: &Sh,
    threads: usize,
) -> Result<Container<T>, MorphError>
where
    T: Extremum,
    S: Storage<T>,
    Sh: Shape + ?Sized,
{
    erode_full_with(input, shape, &T::highest(), threads)
}

/// [`erode_full`] with a caller-supplied identity.
#[tracing::instrument(skip_all, fields(space = %input.space(), threads = threads))]
pub fn erode_full_with<T, S, Sh>(
    input: &Container<T, S>,
    shape: &Sh,
    identity: &T,
    threads: usize,
) -> Result<Container<T>, MorphError>
where
    T: Sample + PartialOrd,
    S: Storage<T>,
    Sh: Shape + ?Sized,
{
    let out_space = full_space(input.space(), shape)?;
    let boundary = Constant(identity.clone());
    morph(
        input,
        out_space,
        shape,
        identity,
        &boundary,
        &MorphConfig::with_threads(threads),
        Op::Erode,
    )
}

/// Erosion over the input's extent, reading outside neighbours through
/// `strategy` instead of the identity.
///
/// With [`Clamp`](strata_access::Clamp) the edge cells extend outwards, so
/// a uniform image stays uniform up to its border.
#[tracing::instrument(skip_all, fields(space = %input.space(), threads = threads))]
pub fn erode_with_extension<T, S, Sh, E>(
    input: &Container<T, S>,
    shape: &Sh,
    strategy: &E,
    threads: usize,
) -> Result<Container<T>, MorphError>
where
    T: Extremum,
    S: Storage<T>,
    Sh: Shape + ?Sized,
    E: ExtensionStrategy<T> + ?Sized,
{
    morph(
        input,
        input.space().clone(),
        shape,
        &T::highest(),
        strategy,
        &MorphConfig::with_threads(threads),
        Op::Erode,
    )
}

/// Grayscale dilation over the input's own extent.
///
/// `output(p) = max { input(p + o) : o in shape }`, with neighbours outside
/// the input reading `T::lowest()`.
#[tracing::instrument(skip_all, fields(space = %input.space(), threads = threads))]
pub fn dilate<T, S, Sh>(
    input: &Container<T, S>,
    shape: &Sh,
    threads: usize,
) -> Result<Container<T>, MorphError>
where
    T: Extremum,
    S: Storage<T>,
    Sh: Shape + ?Sized,
{
    dilate_with(input, shape, &T::lowest(), threads)
}

/// Dilation with a caller-supplied background value.
#[tracing::instrument(skip_all, fields(space = %input.space(), threads = threads))]
pub fn dilate_with<T, S, Sh>(
    input: &Container<T, S>,
    shape: &Sh,
    background: &T,
    threads: usize,
) -> Result<Container<T>, MorphError>
where
    T: Sample + PartialOrd,
    S: Storage<T>,
    Sh: Shape + ?Sized,
{
    let boundary = Constant(background.clone());
    morph(
        input,
        input.space().clone(),
        shape,
        background,
        &boundary,
        &MorphConfig::with_threads(threads),
        Op::Dilate,
    )
}

/// Dilation over the input grown by the shape radius on every axis.
#[tracing::instrument(skip_all, fields(space = %input.space(), threads = threads))]
pub fn dilate_full<T, S, Sh>(
    input: &Container<T, S>,
    shape: &Sh,
    threads: usize,
) -> Result<Container<T>, MorphError>
where
    T: Extremum,
    S: Storage<T>,
    Sh: Shape + ?Sized,
{
    dilate_full_with(input, shape, &T::lowest(), threads)
}

/// [`dilate_full`] with a caller-supplied background value.
#[tracing::instrument(skip_all, fields(space = %input.space(), threads = threads))]
pub fn dilate_full_with<T, S, Sh>(
    input: &Container<T, S>,
    shape: &Sh,
    background: &T,
    threads: usize,
) -> Result<Container<T>, MorphError>
where
    T: Sample + PartialOrd,
    S: Storage<T>,
    Sh: Shape + ?Sized,
{
    let out_space = full_space(input.space(), shape)?;
    let boundary = Constant(background.clone());
    morph(
        input,
        out_space,
        shape,
        background,
        &boundary,
        &MorphConfig::with_threads(threads),
        Op::Dilate,
    )
}

/// Dilation over the input's extent, reading outside neighbours through
/// `strategy`.
#[tracing::instrument(skip_all, fields(space = %input.space(), threads = threads))]
pub fn dilate_with_extension<T, S, Sh, E>(
    input: &Container<T, S>,
    shape: &Sh,
    strategy: &E,
    threads: usize,
) -> Result<Container<T>, MorphError>
where
    T: Extremum,
    S: Storage<T>,
    Sh: Shape + ?Sized,
    E: ExtensionStrategy<T> + ?Sized,
{
    morph(
        input,
        input.space().clone(),
        shape,
        &T::lowest(),
        strategy,
        &MorphConfig::with_threads(threads),
        Op::Dilate,
    )
}

/// Opening: `dilate(erode(input))`.
///
/// Removes bright details smaller than the shape. Idempotent for
/// symmetric shapes.
pub fn open<T, S, Sh>(
    input: &Container<T, S>,
    shape: &Sh,
    threads: usize,
) -> Result<Container<T>, MorphError>
where
    T: Extremum,
    S: Storage<T>,
    Sh: Shape + ?Sized,
{
    open_with(input, shape, &T::highest(), &T::lowest(), threads)
}

/// Opening with caller-supplied identities for both passes.
pub fn open_with<T, S, Sh>(
    input: &Container<T, S>,
    shape: &Sh,
    erode_identity: &T,
    dilate_identity: &T,
    threads: usize,
) -> Result<Container<T>, MorphError>
where
    T: Sample + PartialOrd,
    S: Storage<T>,
    Sh: Shape + ?Sized,
{
    let eroded = erode_with(input, shape, erode_identity, threads)?;
    dilate_with(&eroded, shape, dilate_identity, threads)
}

/// Closing: `erode(dilate(input))`.
///
/// Fills dark details smaller than the shape.
pub fn close<T, S, Sh>(
    input: &Container<T, S>,
    shape: &Sh,
    threads: usize,
) -> Result<Container<T>, MorphError>
where
    T: Extremum,
    S: Storage<T>,
    Sh: Shape + ?Sized,
{
    close_with(input, shape, &T::highest(), &T::lowest(), threads)
}

/// Closing with caller-supplied identities for both passes.
pub fn close_with<T, S, Sh>(
    input: &Container<T, S>,
    shape: &Sh,
    erode_identity: &T,
    dilate_identity: &T,
    threads: usize,
) -> Result<Container<T>, MorphError>
where
    T: Sample + PartialOrd,
    S: Storage<T>,
    Sh: Shape + ?Sized,
{
    let dilated = dilate_with(input, shape, dilate_identity, threads)?;
    erode_with(&dilated, shape, erode_identity, threads)
}

/// Morphology driven by a [`MorphConfig`] instead of an explicit thread
/// count.
///
/// With `threads: None` the worker count is auto-detected (see
/// [`MorphConfig::resolved_threads`]). Outside neighbours read the
/// `Extremum` identity, as in the free functions.
///
/// ```
/// use strata_access::{Container, Layout};
/// use strata_morph::{MorphConfig, RectangleShape};
///
/// let img = Container::create(Layout::Flat, &[16, 16], &7u8).unwrap();
/// let out = MorphConfig::default()
///     .erode(&img, &RectangleShape::new(1, false))
///     .unwrap();
/// assert!(out.iter().all(|&v| v == 7));
/// ```
impl MorphConfig {
    /// [`erode`] with this config's thread count.
    #[tracing::instrument(skip_all, fields(space = %input.space(), threads = ?self.threads))]
    pub fn erode<T, S, Sh>(
        &self,
        input: &Container<T, S>,
        shape: &Sh,
    ) -> Result<Container<T>, MorphError>
    where
        T: Extremum,
        S: Storage<T>,
        Sh: Shape + ?Sized,
    {
        let identity = T::highest();
        let boundary = Constant(identity.clone());
        let space = input.space().clone();
        morph(input, space, shape, &identity, &boundary, self, Op::Erode)
    }

    /// [`dilate`] with this config's thread count.
    #[tracing::instrument(skip_all, fields(space = %input.space(), threads = ?self.threads))]
    pub fn dilate<T, S, Sh>(
        &self,
        input: &Container<T, S>,
        shape: &Sh,
    ) -> Result<Container<T>, MorphError>
    where
        T: Extremum,
        S: Storage<T>,
        Sh: Shape + ?Sized,
    {
        let identity = T::lowest();
        let boundary = Constant(identity.clone());
        let space = input.space().clone();
        morph(input, space, shape, &identity, &boundary, self, Op::Dilate)
    }

    /// [`erode_full`] with this config's thread count.
    #[tracing::instrument(skip_all, fields(space = %input.space(), threads = ?self.threads))]
    pub fn erode_full<T, S, Sh>(
        &self,
        input: &Container<T, S>,
        shape: &Sh,
    ) -> Result<Container<T>, MorphError>
    where
        T: Extremum,
        S: Storage<T>,
        Sh: Shape + ?Sized,
    {
        let identity = T::highest();
        let boundary = Constant(identity.clone());
        let space = full_space(input.space(), shape)?;
        morph(input, space, shape, &identity, &boundary, self, Op::Erode)
    }

    /// [`dilate_full`] with this config's thread count.
    #[tracing::instrument(skip_all, fields(space = %input.space(), threads = ?self.threads))]
    pub fn dilate_full<T, S, Sh>(
        &self,
        input: &Container<T, S>,
        shape: &Sh,
    ) -> Result<Container<T>, MorphError>
    where
        T: Extremum,
        S: Storage<T>,
        Sh: Shape + ?Sized,
    {
        let identity = T::lowest();
        let boundary = Constant(identity.clone());
        let space = full_space(input.space(), shape)?;
        morph(input, space, shape, &identity, &boundary, self, Op::Dilate)
    }

    /// [`open`] with this config's thread count.
    pub fn open<T, S, Sh>(
        &self,
        input: &Container<T, S>,
        shape: &Sh,
    ) -> Result<Container<T>, MorphError>
    where
        T: Extremum,
        S: Storage<T>,
        Sh: Shape + ?Sized,
    {
        let eroded = self.erode(input, shape)?;
        self.dilate(&eroded, shape)
    }

    /// [`close`] with this config's thread count.
    pub fn close<T, S, Sh>(
        &self,
        input: &Container<T, S>,
        shape: &Sh,
    ) -> Result<Container<T>, MorphError>
    where
        T: Extremum,
        S: Storage<T>,
        Sh: Shape + ?Sized,
    {
        let dilated = self.dilate(input, shape)?;
        self.erode(&dilated, shape)
    }
}

fn full_space<Sh>(space: &IndexSpace, shape: &Sh) -> Result<IndexSpace, MorphError>
where
    Sh: Shape + ?Sized,
{
    let radius = shape.radius(space.ndim())?;
    space
        .expand(&radius)
        .map_err(|e| MorphError::Access(e.into()))
}

fn morph<T, S, Sh, E>(
    input: &Container<T, S>,
    out_space: IndexSpace,
    shape: &Sh,
    seed: &T,
    strategy: &E,
    config: &MorphConfig,
    op: Op,
) -> Result<Container<T>, MorphError>
where
    T: Sample + PartialOrd,
    S: Storage<T>,
    Sh: Shape + ?Sized,
    E: ExtensionStrategy<T> + ?Sized,
{
    config.validate()?;
    let offsets: Vec<Coord> = shape.offsets(input.ndim())?.collect();

    let mut out = input.create_like(out_space, seed)?;
    let slabs = out.slabs_mut(config.resolved_threads())?;
    tracing::debug!(
        ?op,
        offsets = offsets.len(),
        slabs = slabs.len(),
        "morphology pass"
    );
    for_each_slab(slabs, |slab| {
        fill_slab(input, slab, &offsets, seed, strategy, op)
    })?;
    Ok(out)
}

fn fill_slab<T, S, E>(
    input: &Container<T, S>,
    slab: Slab<'_, T>,
    offsets: &[Coord],
    seed: &T,
    strategy: &E,
    op: Op,
) -> Result<(), AccessError>
where
    T: Sample + PartialOrd,
    S: Storage<T>,
    E: ExtensionStrategy<T> + ?Sized,
{
    let ndim = input.ndim();
    let mut reader = input.extended_access(strategy);
    let mut out = LocalizingCursor::new(slab);
    let mut centre: Coord = SmallVec::from_elem(0, ndim);
    let mut at: Coord = SmallVec::from_elem(0, ndim);
    while out.has_next() {
        out.advance()?;
        out.localize(&mut centre);
        let acc = out.get_mut()?;
        acc.assign(seed);
        for offset in offsets {
            for d in 0..ndim {
                at[d] = centre[d].saturating_add(offset[d]);
            }
            reader.set_position(&at)?;
            let value = reader.get()?;
            if op.improves(value, acc) {
                acc.assign(value);
            }
        }
    }
    Ok(())
}
