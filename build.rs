extern crate winres;

fn main() {
    // cfg!(target_os) reflects the host here, the target comes from cargo
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "windows" {
        let mut res = winres::WindowsResource::new();
        res.set("FileDescription", "Shell icon to PNG dumper");
        if std::path::Path::new("resources/app.ico").exists() {
            res.set_icon("resources/app.ico");
        }
        if let Err(e) = res.compile() {
            println!("cargo:warning=failed to embed Windows resources: {}", e);
        }
    }
}
