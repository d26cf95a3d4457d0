use anyhow::Result;

use vite_require_context::context::walk::list_files;
use vite_require_context::context::{self, ContextRequest};
use vite_require_context::Pattern;

mod common;

#[test]
fn recursive_walk_lists_nested_files() -> Result<()> {
    let base = common::project_base()?;
    let files = list_files(&base.join("src/modules"), true)?;
    assert_eq!(3, files.len());
    assert!(files[0].ends_with("/a.json"));
    assert!(files[1].ends_with("/b.js"));
    assert!(files[2].ends_with("/sub/c.json"));
    Ok(())
}

#[test]
fn shallow_walk_excludes_subdirectories() -> Result<()> {
    let base = common::project_base()?;
    let files = list_files(&base.join("src/modules"), false)?;
    assert_eq!(2, files.len());
    assert!(files.iter().all(|f| !f.contains("/sub/")));
    Ok(())
}

#[test]
fn missing_directory_errors() -> Result<()> {
    let base = common::project_base()?;
    assert!(list_files(&base.join("src/absent"), true).is_err());
    Ok(())
}

#[test]
fn keys_relative_to_requested_directory() -> Result<()> {
    let base = common::project_base()?;
    let pattern = Pattern::new(r"\.json$")?;
    let file = format!("{}/src/main.js", base.display());
    let request = ContextRequest {
        directory: "./modules",
        recursive: true,
        pattern: &pattern,
        file: &file,
        project_base_path: &base,
        index: 0,
    };
    let generated = context::generate(&request)?;
    let expected_map = "var __require_context_for_vite_map_0 = {\n\
                        \t\"./a.json\" : __require_context_for_vite_0_0,\n\
                        \t\"./sub/c.json\" : __require_context_for_vite_0_1\n\
                        };\n";
    assert_eq!(expected_map, generated.map);
    assert_eq!("__require_context_for_vite_function_0", generated.function_name);
    Ok(())
}

#[test]
fn project_absolute_directory() -> Result<()> {
    let base = common::project_base()?;
    let pattern = Pattern::new(r"\.json$")?;
    let file = format!("{}/src/pages/about.js", base.display());
    let request = ContextRequest {
        directory: "/src/modules",
        recursive: true,
        pattern: &pattern,
        file: &file,
        project_base_path: &base,
        index: 0,
    };
    let generated = context::generate(&request)?;
    assert!(generated.imports.contains("from \"/src/modules/a.json\";"));
    assert!(generated.imports.contains("from \"/src/modules/sub/c.json\";"));
    Ok(())
}

#[test]
fn alias_directory() -> Result<()> {
    let base = common::project_base()?;
    let pattern = Pattern::new(r"\.js$")?;
    let file = format!("{}/src/pages/about.js", base.display());
    let request = ContextRequest {
        directory: "@modules",
        recursive: false,
        pattern: &pattern,
        file: &file,
        project_base_path: &base,
        index: 0,
    };
    let generated = context::generate(&request)?;
    assert!(generated.imports.contains("from \"/src/modules/b.js\";"));
    Ok(())
}

#[test]
fn package_directory() -> Result<()> {
    let base = common::project_base()?;
    let pattern = Pattern::new(r"\.js$")?;
    let file = format!("{}/src/main.js", base.display());
    let request = ContextRequest {
        directory: "widget/lib",
        recursive: false,
        pattern: &pattern,
        file: &file,
        project_base_path: &base,
        index: 0,
    };
    let generated = context::generate(&request)?;
    assert!(generated
        .imports
        .contains("from \"/node_modules/widget/lib/extra.js\";"));
    assert!(generated
        .imports
        .contains("from \"/node_modules/widget/lib/index.js\";"));
    assert!(generated.map.contains("\"./extra.js\""));
    assert!(generated.map.contains("\"./index.js\""));
    Ok(())
}

#[test]
fn parent_relative_directory() -> Result<()> {
    let base = common::project_base()?;
    let pattern = Pattern::new(r"\.json$")?;
    let file = format!("{}/src/deep/page.js", base.display());
    let request = ContextRequest {
        directory: "../modules",
        recursive: true,
        pattern: &pattern,
        file: &file,
        project_base_path: &base,
        index: 0,
    };
    let generated = context::generate(&request)?;
    assert!(generated.map.contains("\"./a.json\""));
    assert!(generated.map.contains("\"./sub/c.json\""));
    Ok(())
}

#[test]
fn empty_match_set_renders_empty_map() -> Result<()> {
    let base = common::project_base()?;
    let pattern = Pattern::new(r"\.vue$")?;
    let file = format!("{}/src/main.js", base.display());
    let request = ContextRequest {
        directory: "./modules",
        recursive: true,
        pattern: &pattern,
        file: &file,
        project_base_path: &base,
        index: 0,
    };
    let generated = context::generate(&request)?;
    assert_eq!("\n", generated.imports);
    assert_eq!("var __require_context_for_vite_map_0 = {};\n", generated.map);
    Ok(())
}

#[test]
fn occurrence_index_namespaces_identifiers() -> Result<()> {
    let base = common::project_base()?;
    let pattern = Pattern::new(r"\.json$")?;
    let file = format!("{}/src/main.js", base.display());
    let request = ContextRequest {
        directory: "./modules",
        recursive: true,
        pattern: &pattern,
        file: &file,
        project_base_path: &base,
        index: 3,
    };
    let generated = context::generate(&request)?;
    assert_eq!("__require_context_for_vite_function_3", generated.function_name);
    assert!(generated.imports.contains("import * as __require_context_for_vite_3_0 "));
    assert!(generated.map.starts_with("var __require_context_for_vite_map_3 = {"));
    Ok(())
}
