mod emission;
mod scoring;
mod wallet;
