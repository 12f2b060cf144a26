mod gateway;
mod helpers;
