use std::env;

use anyhow::Context;
use futures::future::join_all;
use likebutton::app::App;
use likebutton::dom::Document;
use likebutton::models::item_id::ItemId;
use likebutton::utils::logger::{log_activation, log_fatal, log_info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let app = App::new().context("Unable to load config")?;
    let tokens = app.init().context("Unable to init token provider")?;
    let controller = app.controller(tokens).context("Unable to render page")?;

    log_info(format!("Bound {} like buttons on {}", controller.bind(), app.origin));

    let item_ids: Vec<ItemId> = env::args().skip(1).map(ItemId::from).collect();
    if item_ids.is_empty() {
        log_fatal("Usage: likebutton <item_id>...".to_string());
        std::process::exit(2);
    }

    let controller = &controller;
    let activations = item_ids.iter().filter_map(|item_id| match controller.buttons_of(item_id).first() {
        Some(&element) => Some(async move { (item_id, controller.activate(element).await) }),
        None => {
            log_fatal(format!("No like button for item {}", item_id));
            None
        }
    });

    for (item_id, activation) in join_all(activations).await {
        log_activation(item_id, &activation);
    }

    for item_id in &item_ids {
        for counter in controller.counters(item_id) {
            let count = controller.document().text(counter).unwrap_or_default();
            log_info(format!("count_{} = {}", item_id, count));
        }
    }

    Ok(())
}
