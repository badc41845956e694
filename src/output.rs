use colored::Colorize;

pub fn print_banner() {
    println!(
        "{}",
        format!("securewipe v{}", env!("CARGO_PKG_VERSION"))
            .bold()
            .cyan()
    );
    println!();
}

pub fn print_plan(passes: i32, plan: &str) {
    println!(
        "{} {} {}",
        "Pass schedule:".bold(),
        format!("{passes} passes").yellow(),
        format!("[{plan}]").dimmed()
    );
    println!();
}

pub fn print_scan_header() {
    println!("{}", "=== Targets ===".bold().white());
}

pub fn print_scan_entry(path: &str, kind: &str, size: &str) {
    println!("  {}  {:<10} {}", path.dimmed(), kind, size.yellow());
}

pub fn print_scan_total(total: &str) {
    println!("  {} {}", "Total:".bold(), total.green());
    println!();
}

pub fn print_summary_header(passes: i32) {
    println!(
        "{} {}",
        "=== Wipe summary ===".bold().white(),
        format!("({passes} passes per file)").dimmed()
    );
}

pub fn print_summary_row(label: &str, value: &str) {
    println!("  {:<30} {}", label, value.green());
}

pub fn print_rule() {
    println!("  {}", "-".repeat(40).dimmed());
}

pub fn print_alert(msg: &str) {
    eprintln!("{} {}", "securewipe:".red().bold(), msg.red());
}

pub fn print_dry_run_footer() {
    println!(
        "{}",
        "This was a dry run. Run `securewipe wipe --confirm` to destroy."
            .yellow()
            .bold()
    );
}

pub fn print_wipe_complete(wiped: &str) {
    println!(
        "{} {}",
        "Done.".green().bold(),
        format!("{wiped} securely wiped.").green()
    );
}

pub fn print_wiped(path: &str, size: &str) {
    println!("  {} {}  {}", "Wiped".red(), path.dimmed(), size.yellow());
}

pub fn print_wipe_error(path: &str, err: &str) {
    println!("  {} {} - {}", "Failed".red().bold(), path.dimmed(), err.red());
}

pub fn print_dry_run_header() {
    println!(
        "{}",
        "Dry run: pass --confirm to overwrite and delete these targets."
            .yellow()
            .bold()
    );
    println!();
}
