mod helpers;
mod lending_test;
