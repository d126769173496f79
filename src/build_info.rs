/// Git revision captured by `build.rs`, empty outside a checkout.
pub const GIT_DESCRIBE: &str = env!("GIT_DESCRIBE");
pub const GIT_HASH: &str = env!("GIT_HASH");

/// Build information as a JSON object, for tagging benchmark output.
pub fn report(name: &str) -> String {
    format!(
        "{{\n  \"name\": \"{}\",\n  \"version\": \"{}\",\n  \
         \"git_describe\": \"{}\",\n  \"git_hash\": \"{}\"\n}}",
        name,
        env!("CARGO_PKG_VERSION"),
        GIT_DESCRIBE,
        GIT_HASH
    )
}

pub fn print_report(name: &str) {
    println!("{}", report(name));
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn report_test() {
        let r = report("heat_2d_bands");
        assert!(r.starts_with('{'));
        assert!(r.ends_with('}'));
        assert!(r.contains("\"name\": \"heat_2d_bands\""));
        assert!(r.contains(&format!("\"git_hash\": \"{GIT_HASH}\"")));
    }
}
