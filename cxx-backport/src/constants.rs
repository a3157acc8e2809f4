use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Name of the per-project configuration file.
pub const CONFIG_FILENAME: &str = ".cxx-backport.toml";

/// Upper bound on rewrite passes per file unless configured otherwise.
pub const DEFAULT_MAX_PASSES: usize = 16;

/// Set of folders to exclude by default.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert(".git");
        s.insert(".svn");
        s.insert(".hg");
        s.insert("build");
        s.insert("cmake-build-debug");
        s.insert("cmake-build-release");
        s.insert("CMakeFiles");
        s.insert("out");
        s.insert("third_party");
        s.insert("vendor");
        s.insert("node_modules");
        s.insert(".cache");
        s
    })
}

/// File extensions treated as C++ sources by default.
pub fn get_default_extensions() -> &'static [&'static str] {
    &[
        "cpp", "cc", "cxx", "c++", "hpp", "hh", "hxx", "h", "h++", "ipp", "inl", "tpp",
    ]
}

pub use get_default_exclude_folders as DEFAULT_EXCLUDE_FOLDERS;
pub use get_default_extensions as DEFAULT_EXTENSIONS;
