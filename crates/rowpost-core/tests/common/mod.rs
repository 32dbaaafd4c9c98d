pub mod access_server;
