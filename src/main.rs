use ochl_stress::error::AppResult;

fn main() -> AppResult<()> {
    ochl_stress::entry::run()
}
