/// Module containing the reflect/expand/contract/shrink update step.
pub mod nelder_mead;
/// Module containing Torczon's multi-directional update step.
pub mod multi_directional;

pub use multi_directional::MultiDirectionalStep;
pub use nelder_mead::{NelderMeadStep, SimplexExpansionMethod};

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::{
    core::{CountingObjective, GoalType, Point},
    error::{SimplexError, SimplexResult},
    traits::CostFunction,
    DMatrix, DVector, Float,
};

/// The relative shape of the initial simplex, independent of where it will be placed.
///
/// A layout has a fixed dimension and is anchored at the starting point of each run by
/// [`SimplexConfig::build`]. Layouts are validated there, so constructing a malformed layout is
/// not an error until it is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimplexLayout {
    /// The starting point plus one vertex a distance `side` away along each coordinate axis.
    Orthogonal {
        /// The number of coordinates.
        dimension: usize,
        /// The distance from the starting point to each of the other vertices.
        side: Float,
    },
    /// Vertex `i + 1` is the starting point plus `(steps[0], ..., steps[i], 0, ..., 0)`.
    Steps {
        /// One non-zero step per coordinate.
        steps: Vec<Float>,
    },
    /// A reference simplex which is translated so that its first vertex sits on the starting
    /// point.
    Reference {
        /// The `n + 1` vertices of the reference simplex, each with `n` coordinates.
        vertices: Vec<Vec<Float>>,
    },
}

impl Default for SimplexLayout {
    fn default() -> Self {
        Self::orthogonal(1, 1.0)
    }
}

impl SimplexLayout {
    /// An axis-aligned layout with `dimension` coordinates and equal sides of length `side`.
    pub const fn orthogonal(dimension: usize, side: Float) -> Self {
        Self::Orthogonal { dimension, side }
    }
    /// A layout built from cumulative per-coordinate steps.
    pub fn from_steps<I: IntoIterator<Item = Float>>(steps: I) -> Self {
        Self::Steps {
            steps: steps.into_iter().collect(),
        }
    }
    /// A layout copied from the relative positions of a reference simplex.
    pub fn from_reference<I: IntoIterator<Item = Vec<Float>>>(vertices: I) -> Self {
        Self::Reference {
            vertices: vertices.into_iter().collect(),
        }
    }
    /// The number of coordinates of each vertex.
    pub fn dimension(&self) -> usize {
        match self {
            Self::Orthogonal { dimension, .. } => *dimension,
            Self::Steps { steps } => steps.len(),
            Self::Reference { vertices } => vertices.len().saturating_sub(1),
        }
    }
    /// The offsets of vertices `1..=n` relative to vertex `0`.
    ///
    /// # Errors
    ///
    /// Returns [`SimplexError::InvalidConfiguration`] if the layout has no coordinates, contains
    /// non-finite numbers, has the wrong number of (or ragged) vertices, or spans less than `n`
    /// dimensions.
    pub fn offsets(&self) -> SimplexResult<Vec<DVector<Float>>> {
        let offsets = match self {
            Self::Orthogonal { dimension, side } => {
                if *dimension == 0 {
                    return Err(SimplexError::invalid("simplex layout has zero dimension"));
                }
                if !side.is_finite() {
                    return Err(SimplexError::invalid(format!(
                        "simplex side must be finite, got {}",
                        side
                    )));
                }
                (0..*dimension)
                    .map(|i| {
                        let mut offset = DVector::zeros(*dimension);
                        offset[i] = *side;
                        offset
                    })
                    .collect::<Vec<_>>()
            }
            Self::Steps { steps } => {
                if steps.is_empty() {
                    return Err(SimplexError::invalid("simplex layout has zero dimension"));
                }
                if let Some(step) = steps.iter().find(|s| !s.is_finite()) {
                    return Err(SimplexError::invalid(format!(
                        "simplex steps must be finite, got {}",
                        step
                    )));
                }
                let n = steps.len();
                (0..n)
                    .map(|i| DVector::from_fn(n, |j, _| if j <= i { steps[j] } else { 0.0 }))
                    .collect::<Vec<_>>()
            }
            Self::Reference { vertices } => {
                let Some(first) = vertices.first() else {
                    return Err(SimplexError::invalid("reference simplex has no vertices"));
                };
                let n = first.len();
                if n == 0 {
                    return Err(SimplexError::invalid("simplex layout has zero dimension"));
                }
                if vertices.len() != n + 1 {
                    return Err(SimplexError::invalid(format!(
                        "a reference simplex in {} dimensions needs {} vertices, got {}",
                        n,
                        n + 1,
                        vertices.len()
                    )));
                }
                if let Some(i) = vertices.iter().position(|v| v.len() != n) {
                    return Err(SimplexError::invalid(format!(
                        "reference vertex #{} has {} coordinates, expected {}",
                        i,
                        vertices[i].len(),
                        n
                    )));
                }
                if vertices.iter().flatten().any(|v| !v.is_finite()) {
                    return Err(SimplexError::invalid(
                        "reference simplex contains non-finite coordinates",
                    ));
                }
                let origin = DVector::from_column_slice(first);
                vertices
                    .iter()
                    .skip(1)
                    .map(|v| DVector::from_column_slice(v) - &origin)
                    .collect::<Vec<_>>()
            }
        };
        if is_degenerate(&offsets) {
            return Err(SimplexError::invalid(
                "initial simplex is degenerate (its vertices do not span the search space)",
            ));
        }
        Ok(offsets)
    }
}

/// The edge vectors must have full numerical rank: every singular value has to exceed
/// `n * EPSILON` times the largest one.
fn is_degenerate(offsets: &[DVector<Float>]) -> bool {
    let n = offsets.len();
    let edges = DMatrix::from_columns(offsets);
    let svd = edges.svd(false, false);
    let largest = svd.singular_values.max();
    let tolerance = n as Float * Float::EPSILON * largest;
    !(largest > 0.0) || svd.rank(tolerance) < n
}

/// The kind of geometric move made by one [`Simplex::iterate`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    /// The worst vertex was replaced by its reflection through the centroid.
    Reflect,
    /// The worst vertex was replaced by the reflected or the expanded point.
    Expand,
    /// The worst vertex was replaced by a contraction on the reflected side.
    ContractOutside,
    /// The worst vertex was replaced by a contraction on its own side.
    ContractInside,
    /// Every vertex but the best was pulled towards the best.
    Shrink,
    /// All vertices were reflected through the best.
    MultiReflect,
    /// All vertices were reflected through the best and pushed further out.
    MultiExpand,
    /// All vertices were pulled towards the best.
    MultiContract,
}

impl StepKind {
    /// A short label, used as the status message.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Reflect => "REFLECT",
            Self::Expand => "EXPAND",
            Self::ContractOutside => "CONTRACT OUT",
            Self::ContractInside => "CONTRACT IN",
            Self::Shrink => "SHRINK",
            Self::MultiReflect => "MULTI REFLECT",
            Self::MultiExpand => "MULTI EXPAND",
            Self::MultiContract => "MULTI CONTRACT",
        }
    }
    /// The number of objective evaluations this move costs in `dimension` dimensions.
    pub const fn evaluations(&self, dimension: usize) -> usize {
        match self {
            Self::Reflect => 1,
            Self::Expand | Self::ContractOutside | Self::ContractInside => 2,
            Self::Shrink => dimension + 2,
            Self::MultiReflect | Self::MultiExpand | Self::MultiContract => 2 * dimension,
        }
    }
}

/// The update family of a [`Simplex`], chosen when the simplex is configured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimplexStep {
    /// Replace the worst vertex with a reflected, expanded, or contracted point, or shrink.
    NelderMead(NelderMeadStep),
    /// Move every vertex but the best at once.
    MultiDirectional(MultiDirectionalStep),
}

impl Default for SimplexStep {
    fn default() -> Self {
        Self::NelderMead(NelderMeadStep::default())
    }
}
impl From<NelderMeadStep> for SimplexStep {
    fn from(value: NelderMeadStep) -> Self {
        Self::NelderMead(value)
    }
}
impl From<MultiDirectionalStep> for SimplexStep {
    fn from(value: MultiDirectionalStep) -> Self {
        Self::MultiDirectional(value)
    }
}

impl SimplexStep {
    fn iterate<P, U, E>(
        &self,
        points: &mut [Point],
        objective: &mut CountingObjective<'_, P, U, E>,
        goal: GoalType,
    ) -> SimplexResult<StepKind, E>
    where
        P: CostFunction<U, E> + ?Sized,
    {
        match self {
            Self::NelderMead(step) => step.iterate(points, objective, goal),
            Self::MultiDirectional(step) => step.iterate(points, objective, goal),
        }
    }
}

/// A reusable description of a simplex: its initial layout and its update step.
///
/// This is what gets passed to the optimizer; a live [`Simplex`] is built from it at the start of
/// every run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimplexConfig {
    layout: SimplexLayout,
    step: SimplexStep,
}

impl SimplexConfig {
    /// Combine a layout with any update step.
    pub fn new<S: Into<SimplexStep>>(layout: SimplexLayout, step: S) -> Self {
        Self {
            layout,
            step: step.into(),
        }
    }
    /// A layout with the default [`NelderMeadStep`].
    pub fn nelder_mead(layout: SimplexLayout) -> Self {
        Self::new(layout, NelderMeadStep::default())
    }
    /// A layout with the default [`MultiDirectionalStep`].
    pub fn multi_directional(layout: SimplexLayout) -> Self {
        Self::new(layout, MultiDirectionalStep::default())
    }
    /// The initial layout.
    pub const fn layout(&self) -> &SimplexLayout {
        &self.layout
    }
    /// The update step.
    pub const fn step(&self) -> &SimplexStep {
        &self.step
    }
    /// Anchor the layout at `start` and create an unevaluated [`Simplex`].
    ///
    /// # Errors
    ///
    /// Returns [`SimplexError::InvalidConfiguration`] if the layout is malformed or its dimension
    /// differs from the length of `start`.
    pub fn build(&self, start: &DVector<Float>) -> SimplexResult<Simplex> {
        let offsets = self.layout.offsets()?;
        if offsets.len() != start.len() {
            return Err(SimplexError::invalid(format!(
                "simplex has dimension {} but the starting point has {} coordinates",
                offsets.len(),
                start.len()
            )));
        }
        let mut points = Vec::with_capacity(offsets.len() + 1);
        points.push(Point::from(start.clone()));
        points.extend(offsets.iter().map(|offset| Point::from(start + offset)));
        Ok(Simplex {
            points,
            dimension: start.len(),
            step: self.step,
        })
    }
}

/// The live set of `n + 1` vertices used by one run of the optimizer.
///
/// After [`Simplex::evaluate`] and after every [`Simplex::iterate`] the vertices are sorted so
/// that index `0` holds the best vertex and the last index the worst.
#[derive(Clone)]
pub struct Simplex {
    points: Vec<Point>,
    dimension: usize,
    step: SimplexStep,
}

impl Debug for Simplex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#?}", self.points)
    }
}

impl Simplex {
    /// Evaluate every vertex which has no value yet, then sort the vertices best first.
    ///
    /// # Errors
    ///
    /// Returns an error if the evaluation budget runs out or the cost function fails.
    pub fn evaluate<P, U, E>(
        &mut self,
        objective: &mut CountingObjective<'_, P, U, E>,
        goal: GoalType,
    ) -> SimplexResult<(), E>
    where
        P: CostFunction<U, E> + ?Sized,
    {
        for point in self.points.iter_mut() {
            point.evaluate(objective)?;
        }
        sort_points(&mut self.points, goal);
        Ok(())
    }
    /// Perform exactly one geometric step of the configured family.
    ///
    /// Any vertex injected through [`Simplex::set_point`] is evaluated (if needed) and sorted into
    /// place first.
    ///
    /// # Errors
    ///
    /// Returns an error if the evaluation budget runs out or the cost function fails.
    pub fn iterate<P, U, E>(
        &mut self,
        objective: &mut CountingObjective<'_, P, U, E>,
        goal: GoalType,
    ) -> SimplexResult<StepKind, E>
    where
        P: CostFunction<U, E> + ?Sized,
    {
        self.evaluate(objective, goal)?;
        self.step.iterate(&mut self.points, objective, goal)
    }
    /// All vertices, best first (as of the last sort).
    pub fn points(&self) -> &[Point] {
        &self.points
    }
    /// The vertex at `index`, if there is one.
    pub fn point(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }
    /// Replace the vertex at `index`.
    ///
    /// The vertices are not re-sorted until the next [`Simplex::evaluate`] or
    /// [`Simplex::iterate`].
    ///
    /// # Errors
    ///
    /// Returns [`SimplexError::InvalidConfiguration`] if `index` is out of range or the point has
    /// the wrong number of coordinates.
    pub fn set_point(&mut self, index: usize, point: Point) -> SimplexResult<()> {
        if index >= self.points.len() {
            return Err(SimplexError::invalid(format!(
                "vertex index {} is out of range for a simplex with {} vertices",
                index,
                self.points.len()
            )));
        }
        if point.dimension() != self.dimension {
            return Err(SimplexError::invalid(format!(
                "vertex has {} coordinates but the simplex has dimension {}",
                point.dimension(),
                self.dimension
            )));
        }
        self.points[index] = point;
        Ok(())
    }
    /// The number of vertices, `n + 1`.
    pub fn size(&self) -> usize {
        self.points.len()
    }
    /// The number of coordinates of each vertex, `n`.
    pub const fn dimension(&self) -> usize {
        self.dimension
    }
    /// The vertex at index `0`.
    pub fn best(&self) -> &Point {
        &self.points[0]
    }
    /// The vertex at the last index.
    pub fn worst(&self) -> &Point {
        &self.points[self.points.len() - 1]
    }
    /// The centroid of every vertex except the worst.
    pub fn centroid(&self) -> DVector<Float> {
        centroid(&self.points)
    }
    /// The update family of this simplex.
    pub const fn step(&self) -> &SimplexStep {
        &self.step
    }
}

pub(crate) fn sort_points(points: &mut [Point], goal: GoalType) {
    points.sort_by(|a, b| goal.compare(a, b));
}

pub(crate) fn centroid(points: &[Point]) -> DVector<Float> {
    let n = points.len() - 1;
    points[..n].iter().map(|p| &p.x).sum::<DVector<Float>>() / n as Float
}

/// Put `point` in the last slot and restore the best-first order. Ties keep their previous
/// relative order, so a new point never jumps ahead of an equal old one.
pub(crate) fn replace_worst(points: &mut [Point], point: Point, goal: GoalType) {
    let last = points.len() - 1;
    points[last] = point;
    sort_points(points, goal);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::convert::Infallible;

    fn sphere(x: &DVector<Float>, _: &()) -> Result<Float, Infallible> {
        Ok(x.norm_squared())
    }

    fn start(x: &[Float]) -> DVector<Float> {
        DVector::from_column_slice(x)
    }

    #[test]
    fn test_orthogonal_layout() {
        let simplex = SimplexConfig::nelder_mead(SimplexLayout::orthogonal(2, 0.5))
            .build(&start(&[1.0, 2.0]))
            .unwrap();
        assert_eq!(simplex.size(), 3);
        assert_eq!(simplex.dimension(), 2);
        assert_eq!(simplex.points()[0].x, start(&[1.0, 2.0]));
        assert_eq!(simplex.points()[1].x, start(&[1.5, 2.0]));
        assert_eq!(simplex.points()[2].x, start(&[1.0, 2.5]));
        assert!(simplex.points().iter().all(|p| !p.is_evaluated()));
    }

    #[test]
    fn test_steps_layout() {
        let simplex = SimplexConfig::nelder_mead(SimplexLayout::from_steps([1.0, -2.0, 3.0]))
            .build(&start(&[0.0, 0.0, 0.0]))
            .unwrap();
        assert_eq!(simplex.points()[1].x, start(&[1.0, 0.0, 0.0]));
        assert_eq!(simplex.points()[2].x, start(&[1.0, -2.0, 0.0]));
        assert_eq!(simplex.points()[3].x, start(&[1.0, -2.0, 3.0]));
    }

    #[test]
    fn test_reference_layout_is_translated() {
        let layout = SimplexLayout::from_reference([
            vec![10.0, 10.0],
            vec![11.0, 10.0],
            vec![10.0, 12.0],
        ]);
        let simplex = SimplexConfig::nelder_mead(layout)
            .build(&start(&[0.0, 1.0]))
            .unwrap();
        assert_eq!(simplex.points()[0].x, start(&[0.0, 1.0]));
        assert_eq!(simplex.points()[1].x, start(&[1.0, 1.0]));
        assert_eq!(simplex.points()[2].x, start(&[0.0, 3.0]));
    }

    #[test]
    fn test_malformed_layouts_are_rejected() {
        let layouts = [
            SimplexLayout::orthogonal(0, 1.0),
            SimplexLayout::orthogonal(2, 0.0),
            SimplexLayout::orthogonal(2, Float::NAN),
            SimplexLayout::from_steps([1.0, 0.0]),
            SimplexLayout::from_reference([vec![0.0, 0.0], vec![1.0, 0.0]]),
            SimplexLayout::from_reference([vec![0.0, 0.0], vec![1.0], vec![0.0, 1.0]]),
            SimplexLayout::from_reference([vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]]),
        ];
        for layout in layouts {
            let result = SimplexConfig::nelder_mead(layout).build(&start(&[0.0, 0.0]));
            assert!(matches!(
                result,
                Err(SimplexError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_high_dimensional_layouts_are_accepted() {
        let n = 20;
        let simplex = SimplexConfig::nelder_mead(SimplexLayout::from_steps(vec![1.0; n]))
            .build(&DVector::zeros(n))
            .unwrap();
        assert_eq!(simplex.size(), n + 1);
        assert_eq!(simplex.points()[n].x, DVector::from_element(n, 1.0));
        let simplex = SimplexConfig::nelder_mead(SimplexLayout::orthogonal(50, 1e-3))
            .build(&DVector::zeros(50))
            .unwrap();
        assert_eq!(simplex.dimension(), 50);
        let mut steps = vec![1.0; n];
        steps[7] = 0.0;
        let result = SimplexConfig::nelder_mead(SimplexLayout::from_steps(steps))
            .build(&DVector::zeros(n));
        assert!(matches!(result, Err(SimplexError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let result = SimplexConfig::nelder_mead(SimplexLayout::orthogonal(3, 1.0))
            .build(&start(&[0.0, 0.0]));
        assert!(matches!(result, Err(SimplexError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_evaluate_sorts_best_first() {
        let mut simplex = SimplexConfig::nelder_mead(SimplexLayout::orthogonal(2, -1.0))
            .build(&start(&[1.0, 1.0]))
            .unwrap();
        let mut objective = CountingObjective::new(&sphere, &(), usize::MAX);
        simplex.evaluate(&mut objective, GoalType::Minimize).unwrap();
        assert_eq!(objective.evaluations(), 3);
        assert_relative_eq!(simplex.best().fx_checked(), 1.0);
        assert_relative_eq!(simplex.worst().fx_checked(), 2.0);
        simplex.evaluate(&mut objective, GoalType::Maximize).unwrap();
        assert_eq!(objective.evaluations(), 3);
        assert_relative_eq!(simplex.best().fx_checked(), 2.0);
        assert_relative_eq!(simplex.worst().fx_checked(), 1.0);
    }

    #[test]
    fn test_best_first_after_every_iterate() {
        for config in [
            SimplexConfig::nelder_mead(SimplexLayout::orthogonal(3, 1.0)),
            SimplexConfig::multi_directional(SimplexLayout::orthogonal(3, 1.0)),
        ] {
            let mut simplex = config.build(&start(&[2.0, -1.0, 0.5])).unwrap();
            let mut objective = CountingObjective::new(&sphere, &(), usize::MAX);
            simplex.evaluate(&mut objective, GoalType::Minimize).unwrap();
            for _ in 0..50 {
                let before = objective.evaluations();
                let kind = simplex.iterate(&mut objective, GoalType::Minimize).unwrap();
                assert_eq!(objective.evaluations() - before, kind.evaluations(3));
                let best = simplex.best().fx_checked();
                assert!(simplex.points().iter().all(|p| best <= p.fx_checked()));
            }
        }
    }

    #[test]
    fn test_set_point() {
        let mut simplex = SimplexConfig::nelder_mead(SimplexLayout::orthogonal(2, 1.0))
            .build(&start(&[0.0, 0.0]))
            .unwrap();
        let mut objective = CountingObjective::new(&sphere, &(), usize::MAX);
        simplex.evaluate(&mut objective, GoalType::Minimize).unwrap();
        assert!(matches!(
            simplex.set_point(0, Point::from(vec![1.0])),
            Err(SimplexError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            simplex.set_point(3, Point::from(vec![1.0, 1.0])),
            Err(SimplexError::InvalidConfiguration(_))
        ));
        simplex.set_point(0, Point::from(vec![3.0, 0.0])).unwrap();
        assert_eq!(simplex.point(0).unwrap().x, start(&[3.0, 0.0]));
        simplex.iterate(&mut objective, GoalType::Minimize).unwrap();
        let best = simplex.best().fx_checked();
        assert!(simplex.points().iter().all(|p| best <= p.fx_checked()));
    }

    #[test]
    fn test_centroid_excludes_worst() {
        let mut simplex = SimplexConfig::nelder_mead(SimplexLayout::orthogonal(2, 2.0))
            .build(&start(&[0.0, 0.0]))
            .unwrap();
        let weighted = |x: &DVector<Float>, _: &()| -> Result<Float, Infallible> {
            Ok(x[0] + 2.0 * x[1])
        };
        let mut objective = CountingObjective::new(&weighted, &(), usize::MAX);
        simplex.evaluate(&mut objective, GoalType::Minimize).unwrap();
        assert_eq!(simplex.worst().x, start(&[0.0, 2.0]));
        assert_relative_eq!(simplex.centroid(), start(&[1.0, 0.0]));
    }

    #[test]
    fn test_step_kind_evaluations() {
        assert_eq!(StepKind::Reflect.evaluations(4), 1);
        assert_eq!(StepKind::ContractInside.evaluations(4), 2);
        assert_eq!(StepKind::Shrink.evaluations(4), 6);
        assert_eq!(StepKind::MultiContract.evaluations(4), 8);
        assert_eq!(StepKind::Shrink.message(), "SHRINK");
    }
}
