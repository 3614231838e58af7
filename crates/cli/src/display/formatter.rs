use projcfg_core::OutputGroup;

/// Print a group header, its key output and every output
pub fn print_output_group(group: &OutputGroup) {
    let outputs = group.outputs();
    println!("{} ({})", group.display_name(), group.target_name());

    if let Some(key) = group.key_output() {
        println!("  key: {}", key.canonical_name().display());
    }
    for output in &outputs {
        println!("  {}", output.canonical_name().display());
    }
}
