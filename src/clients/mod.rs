pub mod roblox_client;

pub use roblox_client::RobloxClient;
