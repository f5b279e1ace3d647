pub mod test_network;
pub mod test_replay_buffer;
