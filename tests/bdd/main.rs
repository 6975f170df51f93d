mod steps;
mod world;

use std::fs;

use cucumber::{writer, World as _, WriterExt as _};
use futures::FutureExt as _;

use crate::world::TestWorld;

#[tokio::main]
async fn main() {
    fs::create_dir_all("reports").expect("could not create the reports directory");
    let results =
        fs::File::create("reports/cucumber_report.json").expect("could not create the results file");

    TestWorld::cucumber()
        .max_concurrent_scenarios(1)
        .after(|_feature, _rule, _scenario, _ev, world| world::teardown(world).boxed_local())
        .with_writer(
            writer::Basic::stdout()
                .summarized()
                .tee::<TestWorld, _>(writer::Json::for_tee(results))
                .normalized(),
        )
        .run_and_exit("features")
        .await;
}
