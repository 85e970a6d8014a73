pub mod stats_client;
