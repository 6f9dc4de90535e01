//! Single-pass file tree builder
//!
//! The walk appends nodes to an arena and addresses children by index, so a
//! path can be descended and extended while siblings keep being added. The
//! arena is converted into an owned [`FileNode`] tree once the walk is done.

use crate::extractors::{FileContext, ModelCollector, ModelExtractor, EXTRACTORS};
use crate::filter::FileFilter;
use crate::language;
use crate::probe::probe_file;
use archviz_core::{ArchvizError, ArchvizResult, DatabaseInfo, ErrorContext, FileNode, ModelMap};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

const ROOT: usize = 0;

#[derive(Debug)]
struct ArenaNode {
    name: String,
    path: String,
    is_dir: bool,
    line_count: usize,
    file_size: u64,
    language: Option<&'static str>,
    children: Vec<usize>,
}

/// Flat storage for the tree under construction
#[derive(Debug)]
struct TreeArena {
    nodes: Vec<ArenaNode>,
    /// (parent index, raw segment name) -> child index
    index: HashMap<(usize, OsString), usize>,
}

impl TreeArena {
    fn new(root_name: String) -> Self {
        Self {
            nodes: vec![ArenaNode {
                name: root_name,
                path: String::new(),
                is_dir: true,
                line_count: 0,
                file_size: 0,
                language: None,
                children: Vec::new(),
            }],
            index: HashMap::new(),
        }
    }

    /// Descend from the root along `segments`, creating missing nodes
    ///
    /// Every segment but the last is a directory; the last one is a directory
    /// when `leaf_is_dir` says so.
    fn insert_path(&mut self, segments: &[OsString], leaf_is_dir: bool) -> usize {
        let mut current = ROOT;

        for (position, segment) in segments.iter().enumerate() {
            let key = (current, segment.clone());
            current = match self.index.get(&key).copied() {
                Some(existing) => existing,
                None => {
                    let name = segment.to_string_lossy().into_owned();
                    let parent_path = &self.nodes[current].path;
                    let path = if parent_path.is_empty() {
                        name.clone()
                    } else {
                        format!("{}/{}", parent_path, name)
                    };
                    let child = self.nodes.len();
                    self.nodes.push(ArenaNode {
                        name,
                        path,
                        is_dir: position + 1 < segments.len() || leaf_is_dir,
                        line_count: 0,
                        file_size: 0,
                        language: None,
                        children: Vec::new(),
                    });
                    self.nodes[current].children.push(child);
                    self.index.insert(key, child);
                    child
                }
            };
        }

        current
    }

    fn into_tree(mut self) -> FileNode {
        self.take_node(ROOT)
    }

    fn take_node(&mut self, id: usize) -> FileNode {
        let node = &mut self.nodes[id];
        let children = std::mem::take(&mut node.children);
        let name = std::mem::take(&mut node.name);
        let path = std::mem::take(&mut node.path);
        let (is_dir, line_count, file_size, language) =
            (node.is_dir, node.line_count, node.file_size, node.language);

        if is_dir {
            let mut dir = FileNode::directory(name, path);
            dir.children = children
                .into_iter()
                .map(|child| self.take_node(child))
                .collect();
            dir
        } else {
            FileNode::file(
                name,
                path,
                line_count,
                file_size,
                language.map(str::to_string),
            )
        }
    }
}

/// Output of one walk
#[derive(Debug)]
pub struct FileTreeOutput {
    pub root: FileNode,
    pub models: ModelMap,
    pub database_info: DatabaseInfo,
}

/// Walks a directory and builds the tree together with model/schema findings
#[derive(Debug, Clone)]
pub struct FileTreeBuilder<'a> {
    filter: FileFilter,
    extractors: &'a [ModelExtractor],
}

impl Default for FileTreeBuilder<'static> {
    fn default() -> Self {
        Self::new(FileFilter::default())
    }
}

impl FileTreeBuilder<'static> {
    pub fn new(filter: FileFilter) -> Self {
        Self {
            filter,
            extractors: EXTRACTORS,
        }
    }
}

impl<'a> FileTreeBuilder<'a> {
    /// Replace the extractor dispatch table
    pub fn with_extractors(filter: FileFilter, extractors: &'a [ModelExtractor]) -> Self {
        Self { filter, extractors }
    }

    /// Walk `root` depth-first in file-name order
    ///
    /// Unreadable files contribute zero lines and no models; any error from
    /// the directory walk itself aborts the whole build.
    pub fn build(&self, root: &Path) -> ArchvizResult<FileTreeOutput> {
        let root_name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        info!(root = %root.display(), "Building file tree");

        let mut arena = TreeArena::new(root_name);
        let mut collector = ModelCollector::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(root, entry));

        for result in walker {
            let entry = result.map_err(|e| walk_error(root, e))?;
            if entry.depth() == 0 {
                continue;
            }

            let segments = relative_segments(root, entry.path());
            if segments.is_empty() {
                continue;
            }

            let is_dir = entry.file_type().is_dir();
            let id = arena.insert_path(&segments, is_dir);
            if is_dir {
                continue;
            }

            let probe = probe_file(entry.path());
            let node = &mut arena.nodes[id];
            node.file_size = probe.size;
            node.line_count = probe.line_count;
            node.language = language::classify(&node.name);

            match &probe.content {
                Some(content) => {
                    let file = FileContext::new(&arena.nodes[id].path, content);
                    collector.collect(&file, self.extractors);
                }
                None => debug!(
                    path = %entry.path().display(),
                    "Skipping extraction for unreadable file"
                ),
            }
        }

        let node_count = arena.nodes.len();
        let (models, database_info) = collector.into_parts();

        info!(
            nodes = node_count,
            model_files = models.len(),
            tables = database_info.len(),
            "File tree built"
        );

        Ok(FileTreeOutput {
            root: arena.into_tree(),
            models,
            database_info,
        })
    }

    fn is_excluded(&self, root: &Path, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        let relative = relative_segments(root, entry.path())
            .iter()
            .map(|segment| segment.to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        self.filter.is_excluded(&relative, entry.file_type().is_dir())
    }
}

fn relative_segments(root: &Path, path: &Path) -> Vec<OsString> {
    path.strip_prefix(root)
        .map(|relative| {
            relative
                .components()
                .map(|component| component.as_os_str().to_owned())
                .collect()
        })
        .unwrap_or_default()
}

fn walk_error(root: &Path, error: walkdir::Error) -> ArchvizError {
    let path = error
        .path()
        .unwrap_or(root)
        .display()
        .to_string();
    ArchvizError::Filesystem {
        message: format!("Error reading repository structure at {}: {}", path, error),
        path: Some(path),
        source: Some(Box::new(error)),
        context: ErrorContext::new("file_tree")
            .with_operation("walk")
            .with_suggestion("Check that the repository path exists and is readable"),
    }
}
