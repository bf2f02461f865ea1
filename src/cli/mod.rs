pub mod pre_push;
