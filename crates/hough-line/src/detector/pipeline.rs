use super::{DetectError, DetectedLine, HoughParams, LineDetection};
use crate::accumulator::ParameterSpace;
use hough_core::{draw_line, extract_edges, EdgeMap, RasterBuffer, RasterError, Sample};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Brightness of the rendered line.
const LINE_BRIGHTNESS: Sample = 0;

/// Single-line Hough detector.
#[derive(Clone, Debug)]
pub struct LineDetector {
    params: HoughParams,
}

impl LineDetector {
    /// Create a detector, rejecting degenerate parameter axes.
    pub fn new(params: HoughParams) -> Result<Self, DetectError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Detector parameters.
    #[inline]
    pub fn params(&self) -> &HoughParams {
        &self.params
    }

    /// Find the strongest line in `src` and draw it onto a copy.
    pub fn detect(&self, src: &RasterBuffer) -> Result<LineDetection, DetectError> {
        self.detect_with_accumulator(src)
            .map(|(detection, _)| detection)
    }

    /// Same as [`detect`](Self::detect), also returning the filled accumulator.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, src), fields(width = src.width(), height = src.height()))
    )]
    pub fn detect_with_accumulator(
        &self,
        src: &RasterBuffer,
    ) -> Result<(LineDetection, ParameterSpace), DetectError> {
        let edges = extract_edges(src)?;
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("gradient magnitude:\n{}", edges.magnitude().dump());
        }

        let (space, edge_points) = self.accumulate(src, &edges)?;
        let line = self.find_line(&space, edge_points);
        log::info!(
            "peak cell (M, C)=({}, {}) votes={} edge_points={} -> (m, c)=({}, {})",
            line.cell_m,
            line.cell_c,
            line.votes,
            line.edge_points,
            line.slope,
            line.intercept
        );

        let image = render(src, &line)?;
        Ok((LineDetection { image, line }, space))
    }

    /// Vote every edge point above the threshold, weighted by its source intensity.
    ///
    /// Fails with [`DetectError::InvalidParams`] when the axes are too wide
    /// for the image size (see [`HoughParams::validate_for`]).
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
    pub fn accumulate(
        &self,
        src: &RasterBuffer,
        edges: &EdgeMap,
    ) -> Result<(ParameterSpace, usize), DetectError> {
        self.params.validate_for(src.width(), src.height())?;
        let mut space = ParameterSpace::new(self.params.slope, self.params.intercept)?;
        let mut edge_points = 0usize;
        for edge in edges.edges_above(self.params.threshold) {
            space.vote(edge.x, edge.y, src.get(edge.x, edge.y));
            edge_points += 1;
        }
        log::debug!(
            "voted {edge_points} edge points into {}x{} parameter space",
            space.votes().width(),
            space.votes().height()
        );
        Ok((space, edge_points))
    }

    fn find_line(&self, space: &ParameterSpace, edge_points: usize) -> DetectedLine {
        let peak = space.peak();
        let (slope, intercept) = space.line_at(peak.cell_m, peak.cell_c);
        DetectedLine {
            slope,
            intercept,
            cell_m: peak.cell_m,
            cell_c: peak.cell_c,
            votes: peak.votes,
            edge_points,
        }
    }
}

/// Copy `src` and draw `line` across its full width.
///
/// A line without votes is not drawn.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
pub(crate) fn render(src: &RasterBuffer, line: &DetectedLine) -> Result<RasterBuffer, RasterError> {
    let mut out = src.try_clone()?;
    if !line.is_supported() {
        log::warn!("no edge pixel voted; leaving the image unchanged");
        return Ok(out);
    }
    let ((x0, y0), (x1, y1)) = line.endpoints(src.width());
    draw_line(&mut out, x0, y0, x1, y1, LINE_BRIGHTNESS);
    Ok(out)
}
