//! Coupled front/rear path walk that fills a footprint sequence.

use log::{debug, trace};

use crate::config::SweepConfig;
use crate::core::Point2D;
use crate::error::{Result, SweepError};
use crate::source::GuidePath;

use super::FootprintSequence;

impl FootprintSequence {
    /// Walks the path's front track at the configured step interval while
    /// holding a rear point at wheelbase distance behind each front point,
    /// appending one box per coupled step.
    ///
    /// The rear track is stepped against each new front point until it either
    /// yields a point within `wheelbase + coupling_margin` of the front (the
    /// two reference points are rigidly coupled, emit a box) or reports no
    /// real solution (the current rear segment is exhausted, move to the
    /// next one). A front segment with no next point at all means the shape
    /// data is inconsistent and fails the walk.
    pub fn grow_along_path(
        &mut self,
        path: &GuidePath,
        half_x: f64,
        half_y: f64,
        config: &SweepConfig,
    ) -> Result<()> {
        let coupled_limit = config.wheelbase + config.coupling_margin;
        debug!(
            "[FootprintWalk] walking {} front / {} rear track segments",
            path.front().len(),
            path.rear().len()
        );

        let mut fi = 0usize;
        let mut ri = 0usize;
        let mut front: Option<Point2D> = None;
        let mut rear: Option<Point2D> = None;

        while fi < path.front().len() {
            let front_step = path.front()[fi].next_point(front, config.step_interval);
            let next_front = match front_step.point() {
                Some(point) => point,
                None => {
                    return Err(SweepError::PathWalk(format!(
                        "front track segment {fi} has no next point"
                    )))
                }
            };

            while ri < path.rear().len() {
                let rear_step =
                    path.rear()[ri].next_point_ref(rear, &next_front, config.wheelbase);
                let next_rear = match rear_step.point() {
                    Some(point) => point,
                    None => {
                        trace!("[FootprintWalk] rear track segment {ri} exhausted");
                        ri += 1;
                        rear = None;
                        continue;
                    }
                };

                let coupled = next_front.distance(&next_rear) < coupled_limit;
                if coupled {
                    self.grow_front_rear(next_front, next_rear, half_x, half_y)?;
                }
                if rear_step.is_at_end() {
                    ri += 1;
                    rear = None;
                } else {
                    rear = Some(next_rear);
                }
                if coupled {
                    break;
                }
            }

            if front_step.is_at_end() {
                fi += 1;
                front = None;
            } else {
                front = Some(next_front);
            }
        }

        debug!("[FootprintWalk] walk complete, {} segments", self.len());
        Ok(())
    }
}
