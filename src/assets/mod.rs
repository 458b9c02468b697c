pub mod procedural;

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;

use crate::error::CatError;
use crate::render::blend;
use crate::render::layers::LayerSet;

/// Where template and accessory images come from. Paths are relative,
/// `/`-separated, e.g. `images/cats/custom/shorthair/base/shade.png`.
pub trait AssetSource {
    /// Decode one image. Absent files are `CatError::MissingAsset`.
    fn read(&self, path: &str) -> Result<RgbaImage, CatError>;

    /// Sorted paths of the `.png` frames directly inside `dir`. Empty when
    /// the directory does not exist.
    fn frames_in(&self, dir: &str) -> Vec<String>;
}

/// Images on disk under a root directory.
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirAssets {
    fn read(&self, path: &str) -> Result<RgbaImage, CatError> {
        let full = self.root.join(path);
        if !full.is_file() {
            return Err(CatError::MissingAsset { path: path.to_string() });
        }
        let img = image::open(&full).map_err(|source| CatError::Image {
            path: full.clone(),
            source,
        })?;
        Ok(img.to_rgba8())
    }

    fn frames_in(&self, dir: &str) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.root.join(dir)) else {
            return Vec::new();
        };
        let mut frames: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let name = e.file_name().into_string().ok()?;
                name.ends_with(".png").then(|| format!("{dir}/{name}"))
            })
            .collect();
        frames.sort();
        frames
    }
}

/// Images held in memory, keyed by path.
#[derive(Default, Clone)]
pub struct MemoryAssets {
    images: BTreeMap<String, RgbaImage>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, img: RgbaImage) {
        self.images.insert(path.into(), img);
    }

    pub fn remove(&mut self, path: &str) -> Option<RgbaImage> {
        self.images.remove(path)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl AssetSource for MemoryAssets {
    fn read(&self, path: &str) -> Result<RgbaImage, CatError> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| CatError::MissingAsset { path: path.to_string() })
    }

    fn frames_in(&self, dir: &str) -> Vec<String> {
        let prefix = format!("{dir}/");
        self.images
            .keys()
            .filter(|k| {
                k.strip_prefix(&prefix)
                    .is_some_and(|rest| !rest.contains('/') && rest.ends_with(".png"))
            })
            .cloned()
            .collect()
    }
}

/// Cache key: path plus the scale's bit pattern (`f32` is not `Hash`).
type CacheKey = (String, Option<u32>);

/// Asset provider handed to cats. Decoded images are cached by
/// `(path, scale)` and template sets by body type, so several cats of the
/// same body share one read-only `LayerSet`.
pub struct Assets {
    source: Box<dyn AssetSource>,
    images: HashMap<CacheKey, Arc<RgbaImage>>,
    layer_sets: HashMap<String, Arc<LayerSet>>,
}

impl Assets {
    pub fn new(source: impl AssetSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            images: HashMap::new(),
            layer_sets: HashMap::new(),
        }
    }

    pub fn load(&mut self, path: &str, scale: Option<f32>) -> Result<Arc<RgbaImage>, CatError> {
        let key = (path.to_string(), scale.map(f32::to_bits));
        if let Some(img) = self.images.get(&key) {
            return Ok(Arc::clone(img));
        }

        log::debug!("loading {path} (scale {scale:?})");
        let mut img = self.source.read(path)?;
        if let Some(s) = scale.filter(|s| *s != 1.0) {
            img = blend::scale(&img, s);
        }
        let img = Arc::new(img);
        self.images.insert(key, Arc::clone(&img));
        Ok(img)
    }

    /// Like `load`, but absence is expected. Broken files are logged.
    pub fn load_optional(&mut self, path: &str) -> Option<Arc<RgbaImage>> {
        match self.load(path, None) {
            Ok(img) => Some(img),
            Err(e) if e.is_missing() => {
                log::warn!("optional layer absent, skipping: {path}");
                None
            }
            Err(e) => {
                log::warn!("skipping unreadable layer {path}: {e}");
                None
            }
        }
    }

    /// Every frame in `dir`, in file-name order. Unreadable frames are
    /// skipped with a warning.
    pub fn frames(&mut self, dir: &str) -> Vec<Arc<RgbaImage>> {
        let paths = self.source.frames_in(dir);
        paths
            .iter()
            .filter_map(|p| match self.load(p, None) {
                Ok(img) => Some(img),
                Err(e) => {
                    log::warn!("skipping frame {p}: {e}");
                    None
                }
            })
            .collect()
    }

    /// Template set for `body_type`, loaded on first use.
    pub fn layer_set(&mut self, body_type: &str) -> Result<Arc<LayerSet>, CatError> {
        if let Some(set) = self.layer_sets.get(body_type) {
            return Ok(Arc::clone(set));
        }
        let set = Arc::new(LayerSet::load(body_type, self)?);
        self.layer_sets.insert(body_type.to_string(), Arc::clone(&set));
        Ok(set)
    }

    pub fn cached_images(&self) -> usize {
        self.images.len()
    }
}
