//! Code generation from builder projects to mini-program sources.
//!
//! Turns a [`Project`](miniapp_core::Project) into a uni-app bundle: one
//! single-file page per page (template, script, style), the app manifest,
//! the page registry and a global stylesheet. Generation is a pure function
//! of the project and never fails; only laying the bundle out as files can.
//!
//! # Example
//!
//! ```
//! use miniapp_codegen::{generate, CodegenOptions};
//! use miniapp_core::{Page, Project};
//!
//! let project = Project::new("demo", "Demo").with_page(Page::new("p1", "Home", "/pages/index/index"));
//! let bundle = generate(&project);
//! let files = bundle.files(&CodegenOptions::default()).unwrap();
//! assert_eq!(files[3].path, "pages/index/index.vue");
//! ```

#![recursion_limit = "256"]

pub mod error;
pub mod generators;
pub mod value;

pub use error::{CodegenError, Result};
pub use generators::{
    CodeGenerator, CodegenOptions, GeneratedBundle, GeneratedFile, GeneratedPage, TemplateEngine,
    UniAppGenerator,
};

use miniapp_core::Project;

/// Generate a bundle with the default generator.
pub fn generate(project: &Project) -> GeneratedBundle {
    UniAppGenerator::new().generate(project)
}
