use std::collections::HashMap;
use std::env;
use std::fmt::Write;
use std::path::PathBuf;

const ENV_PREFIX: &str = "WPAN_MAC_";

fn main() {
    // (Variable, Type, Default value)
    let mut const_config: HashMap<&str, (&str, &str)> = HashMap::from([
        ("MAC_MAX_PAN_DESCRIPTORS", ("usize", "5")),
        ("MAC_DEFAULT_PAN_ID", ("u16", "0xffff")),
        ("MAC_DEFAULT_CHANNEL", ("u8", "11")),
        ("MAC_DEFAULT_CHANNEL_PAGE", ("u8", "0")),
        ("MAC_NOTIFICATION_QUEUE_DEPTH", ("usize", "2")),
    ]);

    // Make sure we get rerun if needed
    println!("cargo:rerun-if-changed=build.rs");
    for name in const_config.keys() {
        println!("cargo:rerun-if-env-changed={ENV_PREFIX}{name}");
    }

    let mut data = String::new();

    for (var, value) in env::vars() {
        if let Some(name) = var.strip_prefix(ENV_PREFIX) {
            // discard from hashmap as a way of consuming the setting
            let Some((_, (ty, _))) = const_config.remove_entry(name) else {
                panic!("Wrong configuration name {name}");
            };

            writeln!(data, "pub const {name}: {ty} = {value};").unwrap();
        }
    }

    // Take the remaining configs and write the default value to the file
    for (name, (ty, value)) in const_config.iter() {
        writeln!(data, "pub const {name}: {ty} = {value};").unwrap();
    }

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    let out_file = out_dir.join("config.rs");
    std::fs::write(out_file, data).unwrap();
}
