//! `location` subcommand.

use crate::console::{ConsoleView, TokioPlatform};
use crate::{finish, LocationAction};
use storefront_core::client::HttpClient;
use storefront_core::config::WidgetConfig;
use storefront_core::location::Region;
use storefront_core::picker::LocationPicker;

fn print_regions(regions: &[Region]) {
    for region in regions {
        println!("{:>6}  {}", region.id, region.name);
    }
}

pub async fn run_location(
    client: HttpClient,
    config: &WidgetConfig,
    action: LocationAction,
) -> anyhow::Result<()> {
    // No one reads a closing modal here.
    let config = WidgetConfig {
        alert_delay_ms: 0,
        close_delay_ms: 0,
        ..config.clone()
    };
    let picker = LocationPicker::new(client, ConsoleView, TokioPlatform, &config);

    match action {
        LocationAction::States => {
            finish(picker.load_states().await)?;
            print_regions(&picker.states());
        }
        LocationAction::Cities { state_id } => {
            finish(picker.load_cities(&state_id).await)?;
            print_regions(&picker.cities());
        }
        LocationAction::Show => finish(picker.load_saved().await)?,
        LocationAction::Save { state_id, city_id } => {
            // Names are resolved from the loaded lists, as in the modal.
            finish(picker.open().await)?;
            finish(picker.on_state_change(&state_id).await)?;
            if Region::name_of(&picker.cities(), &city_id).is_none() {
                anyhow::bail!("City {} is not in state {}", city_id, state_id);
            }
            picker.on_city_change(&city_id);
            finish(picker.save().await)?;
        }
    }
    Ok(())
}
