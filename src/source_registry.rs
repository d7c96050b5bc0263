//! Process-wide source registry used only by the error raiser.
//!
//! Mirrors the reference runtime's `NUMEROBIS_MODULE_REGISTRY` hash table
//! plus its `PROGRAM_FILES`/`FILE_INDEX` pair: a path-keyed table of program
//! sources (split into lines, since the raiser always wants a specific line)
//! and a single "current file" index that compiled code is expected to
//! update on entry to each translation unit.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use once_cell::sync::Lazy;

/// A single registered program's source, split into lines for the raiser's
/// windowed excerpt.
#[derive(Clone, Debug)]
pub struct Program {
    pub lines: Vec<String>,
}

impl Program {
    pub fn from_source(source: &str) -> Self {
        Program { lines: source.lines().map(str::to_owned).collect() }
    }

    pub fn line(&self, line_no: i32) -> Option<&str> {
        if line_no < 1 {
            return None;
        }
        self.lines.get((line_no - 1) as usize).map(String::as_str)
    }
}

struct ModuleRegistry {
    programs: HashMap<PathBuf, Program>,
    files: Vec<PathBuf>,
}

static REGISTRY: Lazy<RwLock<ModuleRegistry>> = Lazy::new(|| {
    RwLock::new(ModuleRegistry { programs: HashMap::new(), files: Vec::new() })
});

static CURRENT_FILE: AtomicUsize = AtomicUsize::new(0);

/// Registers a program's source under `path`, assigning it the next file
/// index if it isn't already registered. Called during `init()` for every
/// `PROGRAM_FILES` entry the compiler supplies.
pub fn register_program(path: impl AsRef<Path>, source: &str) {
    let path = path.as_ref().to_path_buf();
    let mut reg = REGISTRY.write().unwrap();
    if !reg.programs.contains_key(&path) {
        reg.files.push(path.clone());
    }
    reg.programs.insert(path, Program::from_source(source));
}

/// Compiled code calls this on entry to each translation unit.
pub fn set_current_file(index: usize) {
    CURRENT_FILE.store(index, Ordering::SeqCst);
}

pub fn current_file_index() -> usize {
    CURRENT_FILE.load(Ordering::SeqCst)
}

/// The path of the file currently executing, if one has been registered.
pub fn current_file_path() -> Option<PathBuf> {
    let reg = REGISTRY.read().unwrap();
    reg.files.get(current_file_index()).cloned()
}

/// Looks up the registered [`Program`] for the file currently executing.
pub fn current_program() -> Option<Program> {
    let reg = REGISTRY.read().unwrap();
    let path = reg.files.get(current_file_index())?;
    reg.programs.get(path).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_fetch_lines() {
        register_program("/tmp/test_source_registry_a.num", "x = 1\ny = 2\n");
        let idx = {
            let reg = REGISTRY.read().unwrap();
            reg.files.iter().position(|p| p == Path::new("/tmp/test_source_registry_a.num")).unwrap()
        };
        set_current_file(idx);
        let program = current_program().unwrap();
        assert_eq!(program.line(1), Some("x = 1"));
        assert_eq!(program.line(2), Some("y = 2"));
        assert_eq!(program.line(3), None);
    }
}
