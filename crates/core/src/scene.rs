use std::str::FromStr;

use magnitude_protocol::{ImageId, Point};
use thiserror::Error;
use tracing::warn;

/// One labeled, positioned, sized item in the catalog.
///
/// `true_size` is the object's width in scale units — the same unit system
/// the global scale is measured against. Position and size never change
/// after load.
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Display name. Underscores in the source token are replaced with
    /// spaces at load time.
    pub label: String,
    pub position: Point,
    pub true_size: f64,
    /// Handle to the image resource the frontend loaded for this object.
    pub image: ImageId,
    /// Intrinsic height/width ratio of that image, captured at load time.
    pub aspect: f64,
}

/// Metadata returned by an [`ImageProbe`] for a successfully loaded image.
#[derive(Debug, Clone, Copy)]
pub struct ImageMeta {
    pub id: ImageId,
    pub width: u32,
    pub height: u32,
}

/// Capability through which the scene loader acquires image resources.
///
/// The loader never decodes anything itself: it hands the resolved path to
/// the probe, which loads/uploads the image however the frontend likes and
/// reports the handle plus intrinsic pixel dimensions.
pub trait ImageProbe {
    type Error: std::error::Error;

    fn probe(&mut self, path: &str) -> Result<ImageMeta, Self::Error>;
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene header is incomplete: expected <scale> <target> <step> <prefix>")]
    TruncatedHeader,
    #[error("object record is incomplete: expected <image> <label> <x> <y> <width>")]
    TruncatedRecord,
    #[error("expected a number for {field}, got {token:?}")]
    InvalidNumber { field: &'static str, token: String },
    #[error("{field} must be strictly positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

/// The ordered object catalog plus the initial animation parameters from the
/// scene header. Immutable after load.
#[derive(Debug, Clone)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub initial_scale: f64,
    pub target_scale: f64,
    pub step_factor: f64,
}

impl Scene {
    /// Parse a scene description: a whitespace-separated token stream with a
    /// four-token header followed by five-token object records.
    ///
    /// Malformed tokens fail the whole load — no partial scene is rendered.
    /// Two per-object conditions reject just that object (reported once via
    /// `tracing`, then treated as absent): a non-positive `true_size`, and
    /// an image the probe cannot produce.
    pub fn parse<P: ImageProbe>(source: &str, probe: &mut P) -> Result<Scene, SceneError> {
        let mut tokens = source.split_whitespace();
        let mut header = |field| {
            let token = tokens.next().ok_or(SceneError::TruncatedHeader)?;
            let value = parse_number(token, field)?;
            if value <= 0.0 {
                return Err(SceneError::NonPositive { field, value });
            }
            Ok(value)
        };

        let initial_scale = header("initial scale")?;
        let target_scale = header("target scale")?;
        let step_factor = header("step factor")?;
        let prefix = tokens.next().ok_or(SceneError::TruncatedHeader)?;

        let mut objects = Vec::new();
        while let Some(file) = tokens.next() {
            let label = tokens.next().ok_or(SceneError::TruncatedRecord)?;
            let mut record = |field| {
                let token = tokens.next().ok_or(SceneError::TruncatedRecord)?;
                parse_number(token, field)
            };
            let x = record("x")?;
            let y = record("y")?;
            let true_size = record("true width")?;

            let label = label.replace('_', " ");
            if true_size <= 0.0 {
                warn!(label = %label, true_size, "rejecting object with non-positive size");
                continue;
            }

            let path = format!("{prefix}/{file}");
            let meta = match probe.probe(&path) {
                Ok(meta) => meta,
                Err(e) => {
                    warn!(label = %label, path = %path, error = %e, "image unavailable, skipping object");
                    continue;
                }
            };

            objects.push(SceneObject {
                label,
                position: Point::new(x, y),
                true_size,
                image: meta.id,
                aspect: f64::from(meta.height) / f64::from(meta.width),
            });
        }

        Ok(Scene {
            objects,
            initial_scale,
            target_scale,
            step_factor,
        })
    }
}

fn parse_number(token: &str, field: &'static str) -> Result<f64, SceneError> {
    f64::from_str(token).map_err(|_| SceneError::InvalidNumber {
        field,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    /// Probe that accepts every path and hands out sequential ids with a
    /// fixed 2:1 intrinsic size.
    struct StubProbe {
        paths: Vec<String>,
    }

    impl StubProbe {
        fn new() -> Self {
            Self { paths: Vec::new() }
        }
    }

    impl ImageProbe for StubProbe {
        type Error = Infallible;

        fn probe(&mut self, path: &str) -> Result<ImageMeta, Infallible> {
            self.paths.push(path.to_string());
            Ok(ImageMeta {
                id: ImageId(self.paths.len() - 1),
                width: 200,
                height: 100,
            })
        }
    }

    /// Probe that refuses every path.
    struct FailingProbe;

    #[derive(Debug, Error)]
    #[error("decode failed")]
    struct DecodeFailed;

    impl ImageProbe for FailingProbe {
        type Error = DecodeFailed;

        fn probe(&mut self, _path: &str) -> Result<ImageMeta, DecodeFailed> {
            Err(DecodeFailed)
        }
    }

    #[test]
    fn parses_sample_scene() {
        let mut probe = StubProbe::new();
        let scene = Scene::parse("1000 1 0.99 imgs\nsun.png Sun 0 0 1.4e9", &mut probe)
            .expect("scene should parse");
        assert_eq!(scene.initial_scale, 1000.0);
        assert_eq!(scene.target_scale, 1.0);
        assert_eq!(scene.step_factor, 0.99);
        assert_eq!(scene.objects.len(), 1);
        let obj = &scene.objects[0];
        assert_eq!(obj.label, "Sun");
        assert_eq!(obj.position, Point::new(0.0, 0.0));
        assert_eq!(obj.true_size, 1.4e9);
        assert_eq!(obj.aspect, 0.5);
        assert_eq!(probe.paths, vec!["imgs/sun.png"]);
    }

    #[test]
    fn underscores_become_spaces() {
        let mut probe = StubProbe::new();
        let scene = Scene::parse("1 10 1.01 imgs\nmw.png Milky_Way 0 0 1e21", &mut probe)
            .expect("scene should parse");
        assert_eq!(scene.objects[0].label, "Milky Way");
    }

    #[test]
    fn non_numeric_field_fails_the_load() {
        let mut probe = StubProbe::new();
        let err = Scene::parse("1 10 1.01 imgs\nsun.png Sun zero 0 1", &mut probe)
            .expect_err("parse should fail");
        assert!(matches!(err, SceneError::InvalidNumber { field: "x", .. }));
    }

    #[test]
    fn truncated_record_fails_the_load() {
        let mut probe = StubProbe::new();
        let err = Scene::parse("1 10 1.01 imgs\nsun.png Sun 0", &mut probe)
            .expect_err("parse should fail");
        assert!(matches!(err, SceneError::TruncatedRecord));
    }

    #[test]
    fn non_positive_size_rejects_only_that_object() {
        let mut probe = StubProbe::new();
        let scene = Scene::parse(
            "1 10 1.01 imgs\nbad.png Bad 0 0 0\nsun.png Sun 0 0 1.4e9",
            &mut probe,
        )
        .expect("scene should parse");
        assert_eq!(scene.objects.len(), 1);
        assert_eq!(scene.objects[0].label, "Sun");
    }

    #[test]
    fn unloadable_image_skips_the_object() {
        let mut probe = FailingProbe;
        let scene = Scene::parse("1 10 1.01 imgs\nsun.png Sun 0 0 1.4e9", &mut probe)
            .expect("scene should parse");
        assert!(scene.objects.is_empty());
    }

    #[test]
    fn non_positive_header_scale_is_an_error() {
        let mut probe = StubProbe::new();
        let err = Scene::parse("0 10 1.01 imgs", &mut probe).expect_err("parse should fail");
        assert!(matches!(
            err,
            SceneError::NonPositive {
                field: "initial scale",
                ..
            }
        ));
    }
}
