use std::{collections::HashSet, env, ffi::OsStr, fs, path::PathBuf, sync::LazyLock};

use anyhow::{Context, Result};
use convert_case::{Case, Casing};

static DID_WHITELIST: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    #[allow(unused_mut)]
    let mut whitelist = HashSet::new();

    #[cfg(feature = "individual-user")]
    whitelist.insert("individual_user_template");

    whitelist
});

fn build_did_intfs(out_dir: &str) -> Result<()> {
    println!("cargo:rerun-if-changed=did");

    let mut candid_config = candid_parser::bindings::rust::Config::new();
    candid_config.set_target(candid_parser::bindings::rust::Target::Agent);
    candid_config
        .set_type_attributes("#[derive(CandidType, Deserialize, Debug, PartialEq)]".into());
    let mut did_mod_contents = String::new();

    // create $OUT_DIR/did directory
    let did_dir = PathBuf::from(&out_dir).join("did");
    fs::create_dir_all(&did_dir)?;

    for didinfo in fs::read_dir("did")? {
        let didpath = didinfo?.path();
        if didpath.extension() != Some(OsStr::new("did")) {
            continue;
        }
        let file_name = didpath
            .file_stem()
            .and_then(OsStr::to_str)
            .context("did file name is not utf-8")?;
        if !DID_WHITELIST.contains(file_name) {
            continue;
        }

        let service_name: String = file_name.to_case(Case::Pascal);
        candid_config.set_service_name(service_name);
        let (type_env, actor) = candid_parser::check_file(&didpath).unwrap_or_else(|e| {
            panic!(
                "invalid did file: {}, err: {e}",
                didpath.as_os_str().to_string_lossy()
            )
        });
        let bindings = candid_parser::bindings::rust::compile(&candid_config, &type_env, &actor);

        // write bindings to $OUT_DIR/did/<did file>.rs
        let mut binding_file = did_dir.clone();
        binding_file.push(file_name);
        binding_file.set_extension("rs");
        fs::write(&binding_file, bindings)?;

        // #[path = "$OUT_DIR/did/<did file>.rs"] pub mod <did file>;
        did_mod_contents.push_str(&format!(
            "#[path = \"{}\"] pub mod {};\n",
            binding_file.to_string_lossy(),
            file_name
        ));
    }

    let binding_mod_file = did_dir.join("mod.rs");
    fs::write(binding_mod_file, did_mod_contents)?;

    Ok(())
}

fn main() -> Result<()> {
    let out_dir = env::var("OUT_DIR")?;

    build_did_intfs(&out_dir)
}
