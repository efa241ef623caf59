use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::constants::*;
use crate::core::error::GameError;
use crate::core::game_state::RunState;
use crate::floors::block_of;

/// Prices on a shop floor. Both scale linearly with the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopOffer {
    pub block: u32,
    pub device_price: u32,
    pub heal_price: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealReceipt {
    pub healed: usize,
    pub cost: u32,
}

pub fn offer_for_floor(floor: u32) -> ShopOffer {
    let block = block_of(floor);
    ShopOffer {
        block,
        device_price: DEVICE_PRICE_BASE + DEVICE_PRICE_STEP * (block - 1),
        heal_price: HEAL_PRICE_BASE + HEAL_PRICE_STEP * (block - 1),
    }
}

fn charge(state: &mut RunState, price: u32) -> Result<(), GameError> {
    if state.currency < price {
        return Err(GameError::InsufficientFunds {
            have: state.currency,
            need: price,
        });
    }
    state.currency -= price;
    Ok(())
}

/// Buys one capture device. Returns the price paid.
pub fn buy_capture_device(state: &mut RunState, offer: &ShopOffer) -> Result<u32, GameError> {
    charge(state, offer.device_price)?;
    state.capture_devices += 1;
    info!(price = offer.device_price, devices = state.capture_devices, "bought capture device");
    Ok(offer.device_price)
}

/// Heals the whole roster. Costs nothing when nobody is hurt.
pub fn heal_roster(state: &mut RunState, offer: &ShopOffer) -> Result<HealReceipt, GameError> {
    if state.roster.is_empty() {
        return Err(GameError::EmptyRoster);
    }
    if !state.roster.needs_healing() {
        return Ok(HealReceipt { healed: 0, cost: 0 });
    }
    charge(state, offer.heal_price)?;
    let healed = state.roster.heal_all();
    info!(healed, price = offer.heal_price, "healed roster at shop");
    Ok(HealReceipt {
        healed,
        cost: offer.heal_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::creatures::{instantiate_owned, instantiate_wild, lookup};

    fn state_with_roster() -> RunState {
        let mut state = RunState::new(&GameConfig::default());
        let wild = instantiate_wild(lookup("Dropling").unwrap(), 3);
        state.roster.push(instantiate_owned(&wild, 0));
        state
    }

    #[test]
    fn test_prices_scale_by_block() {
        assert_eq!(offer_for_floor(5).device_price, 25);
        assert_eq!(offer_for_floor(5).heal_price, 50);
        assert_eq!(offer_for_floor(25).device_price, 75);
        assert_eq!(offer_for_floor(25).heal_price, 150);
    }

    #[test]
    fn test_buy_device() {
        let mut state = state_with_roster();
        let offer = offer_for_floor(15);
        assert_eq!(buy_capture_device(&mut state, &offer), Ok(50));
        assert_eq!(state.currency, 50);
        assert_eq!(state.capture_devices, 4);
    }

    #[test]
    fn test_buy_device_insufficient_funds() {
        let mut state = state_with_roster();
        state.currency = 10;
        let offer = offer_for_floor(5);
        assert_eq!(
            buy_capture_device(&mut state, &offer),
            Err(GameError::InsufficientFunds { have: 10, need: 25 })
        );
        assert_eq!(state.currency, 10);
        assert_eq!(state.capture_devices, 3);
    }

    #[test]
    fn test_heal_is_free_when_everyone_is_healthy() {
        let mut state = state_with_roster();
        let receipt = heal_roster(&mut state, &offer_for_floor(5)).unwrap();
        assert_eq!(receipt, HealReceipt { healed: 0, cost: 0 });
        assert_eq!(state.currency, 100);
    }

    #[test]
    fn test_heal_charges_and_restores() {
        let mut state = state_with_roster();
        state.roster.get_mut(0).unwrap().hp = 0;
        let receipt = heal_roster(&mut state, &offer_for_floor(5)).unwrap();
        assert_eq!(receipt.healed, 1);
        assert_eq!(state.currency, 50);
        assert!(!state.roster.needs_healing());
    }

    #[test]
    fn test_heal_rejects_empty_roster() {
        let mut state = RunState::new(&GameConfig::default());
        assert_eq!(
            heal_roster(&mut state, &offer_for_floor(5)),
            Err(GameError::EmptyRoster)
        );
    }
}
