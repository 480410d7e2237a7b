pub mod cnp_gateway;
