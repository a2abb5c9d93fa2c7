//! Interaction diagram layout
//!
//! A single top-to-bottom pass over the statements. The tidemark, the lowest
//! Y committed so far, is handed to each step by value and handed back
//! advanced; nothing reads it backwards. Along the way each lifeline's
//! activity boxes are tracked and every line and label registers the span it
//! claims. Once the pass is done those claims and boxes are turned into the
//! dashed lifeline segments.

use serde::Serialize;
use tracing::{debug, info, span, trace, Level};
use unicode_width::UnicodeWidthStr;

use super::activity::ActivityBoxes;
use super::events::Event;
use super::lifeline::LifelineExtent;
use super::model::{LifelineId, SequenceModel, Statement, StatementKind};
use super::nogo::NoGoRegistry;
use super::spacing::Spacing;
use crate::core::{
    BoxError, DiagramError, Dimensions, HJust, LayoutConfig, Point, PrimitiveSink, Primitives,
    RatioSizer, Sizer, Sizes, TideMark, VJust,
};

/// Final extent of a laid out diagram
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiagramSize {
    pub width: f64,
    pub height: f64,
}

/// A laid out diagram: its size and every primitive produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram {
    pub width: f64,
    pub height: f64,
    pub primitives: Primitives,
}

/// Statement being laid out, with its lifelines resolved
struct Step<'s> {
    index: usize,
    statement: &'s Statement,
    from: LifelineId,
    to: LifelineId,
}

/// One layout run over a model
pub struct SequenceLayout<'a> {
    model: &'a SequenceModel,
    dims: Dimensions,
    sizes: Sizes,
    spacing: Spacing,
    boxes: Vec<ActivityBoxes>,
    no_go: NoGoRegistry,
    lifeline_top: f64,
}

impl<'a> SequenceLayout<'a> {
    pub fn new(
        model: &'a SequenceModel,
        dims: Dimensions,
        sizer: &dyn Sizer,
    ) -> Result<Self, DiagramError> {
        let sizes = Sizes::resolve(sizer)?;
        let spacing = Spacing::new(
            dims.width,
            dims.font_height,
            model.lifeline_count(),
            sizes.ideal_lifeline_title_box_width,
        )?;
        Ok(Self {
            model,
            dims,
            sizes,
            spacing,
            boxes: vec![ActivityBoxes::new(); model.lifeline_count()],
            no_go: NoGoRegistry::new(),
            lifeline_top: 0.0,
        })
    }

    pub fn spacing(&self) -> &Spacing {
        &self.spacing
    }

    /// Lay out into a fresh recording sink
    pub fn render(self) -> Result<Diagram, DiagramError> {
        let mut primitives = Primitives::new();
        primitives.set_hints(
            self.dims.font_height,
            self.sizes.dash_line_dash_len,
            self.sizes.dash_line_dash_gap,
        );
        let size = self.create(&mut primitives)?;
        Ok(Diagram {
            width: size.width,
            height: size.height,
            primitives,
        })
    }

    /// Run the full pass, emitting primitives into `sink`
    pub fn create<S: PrimitiveSink>(mut self, sink: &mut S) -> Result<DiagramSize, DiagramError> {
        let layout_span = span!(
            Level::INFO,
            "layout_sequence",
            lifelines = self.model.lifeline_count(),
            statements = self.model.statements().len()
        );
        let _enter = layout_span.enter();

        let mut tide = self.frame_title(sink, TideMark::default());
        tide = self.title_boxes(sink, tide)?;

        let model = self.model;
        for (index, statement) in model.statements().iter().enumerate() {
            tide = self.statement(sink, index, statement, tide)?;
        }

        tide = tide.advance(self.sizes.lifeline_final_pad_b);
        self.close_open_boxes(tide)?;
        self.draw_activity_boxes(sink)?;
        self.draw_lifelines(sink, tide)?;

        let height = tide.advance(self.sizes.frame_pad_b).y();
        sink.add_rect(0.0, 0.0, self.dims.width, height);

        info!(
            width = self.dims.width,
            height,
            claims = self.no_go.len(),
            "Layout completed"
        );
        Ok(DiagramSize {
            width: self.dims.width,
            height,
        })
    }

    fn frame_title<S: PrimitiveSink>(&self, sink: &mut S, tide: TideMark) -> TideMark {
        let lines = match self.model.title() {
            Some(lines) if !lines.is_empty() => lines,
            _ => return tide.advance(self.sizes.frame_pad_t),
        };

        let fh = self.dims.font_height;
        let s = &self.sizes;
        let right = s.frame_title_text_pad_l + self.label_width(lines) + s.frame_title_text_pad_r;
        let bottom =
            tide.y() + s.frame_title_text_pad_t + lines.len() as f64 * fh + s.frame_title_text_pad_b;

        for (i, line) in lines.iter().enumerate() {
            let y = tide.y() + s.frame_title_text_pad_t + i as f64 * fh;
            sink.add_label(line, fh, s.frame_title_text_pad_l, y, HJust::Left, VJust::Top);
        }
        sink.add_rect(0.0, tide.y(), right.min(self.dims.width), bottom);

        tide.advance(bottom - tide.y() + s.frame_title_rect_pad_b)
    }

    fn title_boxes<S: PrimitiveSink>(
        &mut self,
        sink: &mut S,
        tide: TideMark,
    ) -> Result<TideMark, DiagramError> {
        let lifelines = self.model.lifelines();
        if lifelines.is_empty() {
            self.lifeline_top = tide.y();
            return Ok(tide);
        }

        let fh = self.dims.font_height;
        let s = &self.sizes;
        let max_lines = lifelines.iter().map(|l| l.title.len()).max().unwrap_or(1).max(1);
        let top = tide.y();
        let bottom = top + s.title_box_text_pad_t + max_lines as f64 * fh + s.title_box_text_pad_b;

        for (id, lifeline) in self.model.lifeline_ids().zip(lifelines) {
            let coords = self.spacing.centre_line(id)?;
            sink.add_rect(coords.left, top, coords.right, bottom);
            for (i, line) in lifeline.title.iter().enumerate() {
                let y = top + s.title_box_text_pad_t + i as f64 * fh;
                sink.add_label(line, fh, coords.centre, y, HJust::Centre, VJust::Top);
            }
        }

        debug!(top, bottom, title_lines = max_lines, "Placed lifeline title boxes");
        self.lifeline_top = bottom;
        Ok(tide.advance(bottom - top + s.title_box_pad_b))
    }

    fn statement<S: PrimitiveSink>(
        &mut self,
        sink: &mut S,
        index: usize,
        statement: &Statement,
        tide: TideMark,
    ) -> Result<TideMark, DiagramError> {
        let events = Event::for_statement(statement.kind);
        if events.is_empty() {
            return Ok(tide);
        }

        let ids = statement
            .lifelines
            .iter()
            .map(|name| self.model.resolve(name, index, statement.line))
            .collect::<Result<Vec<_>, _>>()?;
        let (from, to) = match ids.as_slice() {
            [only] => (*only, *only),
            [from, to] => (*from, *to),
            _ => {
                return Err(DiagramError::layout_error(format!(
                    "statement {} ('{}') has {} lifeline references",
                    index,
                    statement.kind,
                    ids.len()
                )))
            }
        };

        if matches!(statement.kind, StatementKind::Full | StatementKind::Dash) && from == to {
            return Err(DiagramError::layout_error(format!(
                "statement {} (line {}): '{}' from '{}' to itself, use 'self' instead",
                index, statement.line, statement.kind, statement.lifelines[0]
            )));
        }

        debug!(statement = index, kind = %statement.kind, tidemark = %tide, "Laying out statement");

        let step = Step {
            index,
            statement,
            from,
            to,
        };
        let mut tide = tide;
        for event in events {
            let before = tide;
            tide = self.event(sink, *event, &step, tide)?;
            if event.advances_tidemark() {
                debug_assert!(tide >= before, "tidemark moved backwards during {}", event);
            } else {
                debug_assert_eq!(tide, before, "tidemark moved during {}", event);
            }
            trace!(%event, from = %before, to = %tide, "Handled event");
        }
        Ok(tide)
    }

    fn event<S: PrimitiveSink>(
        &mut self,
        sink: &mut S,
        event: Event,
        step: &Step<'_>,
        tide: TideMark,
    ) -> Result<TideMark, DiagramError> {
        match event {
            Event::InteractionLabel => self.interaction_label(sink, step, tide),
            Event::PotentiallyStartFromBox => {
                self.potentially_start_box(step.from, step.index, tide)?;
                Ok(tide)
            }
            Event::PotentiallyStartToBox => {
                self.potentially_start_box(step.to, step.index, tide)?;
                Ok(tide)
            }
            Event::InteractionLine => self.interaction_line(sink, step, tide),
            Event::SelfInteractionLines => self.self_interaction_lines(sink, step, tide),
            Event::EndBox => {
                self.end_box(step.from, step.index, tide)?;
                Ok(tide)
            }
        }
    }

    fn interaction_label<S: PrimitiveSink>(
        &mut self,
        sink: &mut S,
        step: &Step<'_>,
        tide: TideMark,
    ) -> Result<TideMark, DiagramError> {
        let fh = self.dims.font_height;
        let from_x = self.spacing.centre_line(step.from)?.centre;
        let to_x = self.spacing.centre_line(step.to)?.centre;

        let self_call = step.statement.kind == StatementKind::SelfCall;
        let (x, h_just) = if self_call {
            let x = from_x + self.sizes.activity_box_width / 2.0 + self.sizes.self_loop_label_pad_l;
            (x, HJust::Left)
        } else {
            ((from_x + to_x) / 2.0, HJust::Centre)
        };

        let top = tide.y();
        for (i, line) in step.statement.label.iter().enumerate() {
            sink.add_label(line, fh, x, top + i as f64 * fh, h_just, VJust::Top);
        }
        let height =
            step.statement.label.len() as f64 * fh + self.sizes.interaction_line_text_pad_b;

        if self_call {
            let reach = x + self.label_width(&step.statement.label);
            self.no_go
                .register_reaching_claim(step.from, reach, top, top + height);
        } else {
            self.no_go
                .register_claim(step.from, step.to, top, top + height);
        }
        Ok(tide.advance(height))
    }

    /// Estimated width of the widest label line
    fn label_width(&self, lines: &[String]) -> f64 {
        let widest = lines
            .iter()
            .map(|l| UnicodeWidthStr::width(l.as_str()))
            .max()
            .unwrap_or(0);
        widest as f64 * self.sizes.char_width
    }

    fn interaction_line<S: PrimitiveSink>(
        &mut self,
        sink: &mut S,
        step: &Step<'_>,
        tide: TideMark,
    ) -> Result<TideMark, DiagramError> {
        let y = tide.y();
        let from_x = self.spacing.centre_line(step.from)?.centre;
        let to_x = self.spacing.centre_line(step.to)?.centre;
        let direction = if to_x >= from_x { 1.0 } else { -1.0 };

        let x1 = from_x + direction * self.box_offset(step.from);
        let x2 = to_x - direction * self.box_offset(step.to);
        let dashed = step.statement.kind == StatementKind::Dash;

        sink.add_line(x1, y, x2, y, dashed);
        self.arrow_head(sink, x2, y, direction);

        let pad = self.sizes.interaction_line_pad_b;
        self.no_go.register_claim(step.from, step.to, y, y + pad);
        Ok(tide.advance(pad))
    }

    fn self_interaction_lines<S: PrimitiveSink>(
        &mut self,
        sink: &mut S,
        step: &Step<'_>,
        tide: TideMark,
    ) -> Result<TideMark, DiagramError> {
        let top = tide.y();
        let centre = self.spacing.centre_line(step.from)?.centre;
        let left = centre + self.box_offset(step.from);
        let right = left + self.sizes.self_loop_width;
        let bottom = top + self.sizes.self_loop_height;

        sink.add_line(left, top, right, top, false);
        sink.add_line(right, top, right, bottom, false);
        sink.add_line(right, bottom, left, bottom, false);
        self.arrow_head(sink, left, bottom, -1.0);

        let advance = self.sizes.self_loop_height + self.sizes.interaction_line_pad_b;
        self.no_go
            .register_reaching_claim(step.from, right, top, top + advance);
        Ok(tide.advance(advance))
    }

    /// Filled triangle with its tip at `(tip_x, y)`, pointing along `direction`
    fn arrow_head<S: PrimitiveSink>(&self, sink: &mut S, tip_x: f64, y: f64, direction: f64) {
        let base_x = tip_x - direction * self.sizes.arrow_len;
        let half = self.sizes.arrow_height / 2.0;
        sink.add_filled_polygon(vec![
            Point::new(tip_x, y),
            Point::new(base_x, y - half),
            Point::new(base_x, y + half),
        ]);
    }

    /// Horizontal distance from centreline to the edge of an open box
    fn box_offset(&self, lifeline: LifelineId) -> f64 {
        match self.boxes.get(lifeline.index()) {
            Some(boxes) if boxes.has_open_box() => self.sizes.activity_box_width / 2.0,
            _ => 0.0,
        }
    }

    fn potentially_start_box(
        &mut self,
        lifeline: LifelineId,
        statement: usize,
        tide: TideMark,
    ) -> Result<(), DiagramError> {
        let boxes = self.tracker(lifeline)?;
        if boxes.has_open_box() {
            return Ok(());
        }
        boxes
            .add_starting_at(tide.y())
            .map_err(|e| self.box_error(lifeline, statement, e))
    }

    fn end_box(
        &mut self,
        lifeline: LifelineId,
        statement: usize,
        tide: TideMark,
    ) -> Result<(), DiagramError> {
        let boxes = self.tracker(lifeline)?;
        if !boxes.has_open_box() {
            debug!(%lifeline, statement, "Ignoring stop on lifeline with no open box");
            return Ok(());
        }
        boxes
            .terminate_at(tide.y())
            .map_err(|e| self.box_error(lifeline, statement, e))
    }

    fn close_open_boxes(&mut self, tide: TideMark) -> Result<(), DiagramError> {
        let after_last = self.model.statements().len();
        for id in self.model.lifeline_ids() {
            self.end_box(id, after_last, tide)?;
        }
        Ok(())
    }

    fn draw_activity_boxes<S: PrimitiveSink>(&self, sink: &mut S) -> Result<(), DiagramError> {
        let half = self.sizes.activity_box_width / 2.0;
        for (id, boxes) in self.model.lifeline_ids().zip(&self.boxes) {
            let centre = self.spacing.centre_line(id)?.centre;
            for segment in boxes.closed_segments() {
                sink.add_rect(centre - half, segment.start, centre + half, segment.end);
            }
        }
        Ok(())
    }

    fn draw_lifelines<S: PrimitiveSink>(
        &self,
        sink: &mut S,
        tide: TideMark,
    ) -> Result<(), DiagramError> {
        let extent = LifelineExtent::new(
            self.lifeline_top,
            tide.y(),
            self.sizes.min_lifeline_seg_length,
        );
        for (id, boxes) in self.model.lifeline_ids().zip(&self.boxes) {
            let centre = self.spacing.centre_line(id)?.centre;
            let gaps = self.no_go.gaps_for(id, &self.spacing)?;
            let segments = extent.assemble(&gaps, &boxes.closed_segments());
            debug!(
                %id,
                gaps = gaps.len(),
                segments = segments.len(),
                "Assembled lifeline"
            );
            for segment in segments {
                sink.add_line(centre, segment.start, centre, segment.end, true);
            }
        }
        Ok(())
    }

    fn tracker(&mut self, lifeline: LifelineId) -> Result<&mut ActivityBoxes, DiagramError> {
        let count = self.boxes.len();
        self.boxes
            .get_mut(lifeline.index())
            .ok_or(DiagramError::UnregisteredLifeline {
                index: lifeline.index(),
                count,
            })
    }

    fn box_error(&self, lifeline: LifelineId, statement: usize, source: BoxError) -> DiagramError {
        let name = self
            .model
            .lifeline(lifeline)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| lifeline.to_string());
        DiagramError::ActivityBox {
            lifeline: name,
            statement,
            source,
        }
    }
}

/// Layout entry point driven by a [`LayoutConfig`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceLayoutAlgorithm {
    config: LayoutConfig,
}

impl SequenceLayoutAlgorithm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Width and font height for `model` under this configuration
    pub fn dimensions(&self, model: &SequenceModel) -> Result<Dimensions, DiagramError> {
        let scale = self
            .config
            .font_scale
            .or_else(|| model.text_size())
            .unwrap_or(1.0);
        LayoutConfig {
            font_scale: Some(scale),
            ..self.config
        }
        .validate()?;
        Ok(Dimensions::from_width(self.config.width, scale))
    }

    /// Lay out `model` with the production sizer
    pub fn layout(&self, model: &SequenceModel) -> Result<Diagram, DiagramError> {
        let dims = self.dimensions(model)?;
        let sizer = RatioSizer::new(dims.font_height);
        SequenceLayout::new(model, dims, &sizer)?.render()
    }
}
